//! Shared utilities and common types for the session services
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types loaded from the environment
//! - The JSON response envelope and error codes
//! - Field validators for registration and profile input

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, Environment,
    DatabaseConfig, JwtConfig, CacheConfig, RevocationFailurePolicy,
    ServerConfig, CorsConfig, UpstreamConfig,
};
pub use errors::error_codes;
pub use types::JsonResult;
pub use utils::validation;
