//! Response types shared by the HTTP services

pub mod response;

pub use response::{HealthResponse, HealthStatus, JsonResult, ServiceHealth};
