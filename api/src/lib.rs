//! HTTP layer for the auth, user and order services
//!
//! Each service binary in `src/bin` wires infrastructure adapters into the
//! app factories of [`app`]. Tests build the same apps over in-memory
//! collaborators.

pub mod app;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
