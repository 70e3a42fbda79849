//! Configuration module with per-concern sub-modules
//!
//! - `auth` - JWT lifetimes, signing secret and the revocation failure policy
//! - `cache` - Redis connection used by the revocation list and profile cache
//! - `database` - MySQL connection pool for the user store
//! - `environment` - Environment detection
//! - `server` - HTTP bind address, CORS and upstream service locations

pub mod auth;
pub mod cache;
pub mod database;
pub mod environment;
pub mod server;

use serde::{Deserialize, Serialize};

pub use auth::{AuthConfig, JwtConfig, RevocationFailurePolicy, DEFAULT_JWT_SECRET};
pub use cache::CacheConfig;
pub use database::DatabaseConfig;
pub use environment::Environment;
pub use server::{CorsConfig, ServerConfig, UpstreamConfig};

/// Complete configuration for one service process
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Cache configuration
    pub cache: CacheConfig,

    /// CORS configuration
    #[serde(default)]
    pub cors: CorsConfig,

    /// Upstream services (order service only)
    #[serde(default)]
    pub upstream: UpstreamConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            auth: AuthConfig::default(),
            cache: CacheConfig::default(),
            cors: CorsConfig::default(),
            upstream: UpstreamConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment for a service listening on `port_var`
    pub fn from_env(port_var: &str, default_port: u16) -> Self {
        Self {
            environment: Environment::from_env(),
            server: ServerConfig::from_env(port_var, default_port),
            database: DatabaseConfig::from_env(),
            auth: AuthConfig::from_env(),
            cache: CacheConfig::from_env(),
            cors: CorsConfig::from_env(),
            upstream: UpstreamConfig::from_env(),
        }
    }

    /// Reject settings a production deployment must never run with
    pub fn validate(&self) -> Result<(), String> {
        if self.environment.is_production() && self.auth.jwt.is_using_default_secret() {
            return Err("JWT_SECRET must be set in production".to_string());
        }
        if self.auth.jwt.secret.is_empty() {
            return Err("JWT_SECRET must not be empty".to_string());
        }
        if self.auth.jwt.access_token_expiry > self.auth.jwt.refresh_token_expiry {
            return Err(format!(
                "access token expiry ({}s) exceeds refresh token expiry ({}s)",
                self.auth.jwt.access_token_expiry, self.auth.jwt.refresh_token_expiry
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid_outside_production() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_production_rejects_default_secret() {
        let config = AppConfig {
            environment: Environment::Production,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_access_ttl_longer_than_refresh() {
        let mut config = AppConfig::default();
        config.auth.jwt.access_token_expiry = 7200;
        config.auth.jwt.refresh_token_expiry = 3600;
        assert!(config.validate().is_err());
    }
}
