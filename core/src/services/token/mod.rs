//! Token service module for JWT management
//!
//! This module handles:
//! - Issuing HS256 access/refresh pairs
//! - Verifying signature, expiry and kind
//! - Computing the remaining lifetime used for revocation TTLs

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
