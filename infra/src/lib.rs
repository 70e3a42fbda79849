//! # Infrastructure Layer
//!
//! Concrete adapters for the traits defined in `ms_core`:
//!
//! - **Database**: MySQL user repository using SQLx
//! - **Cache**: Redis client, revocation store and profile cache
//! - **Services**: bcrypt password hashing
//! - **Clients**: HTTP client for the user service, used by the order service
//!
//! ## Features
//!
//! - `mysql`: Enable MySQL database support (default)
//! - `redis-cache`: Enable Redis caching support (default)

use ms_core::errors::DomainError;

/// Cache module - Redis client and the stores built on it
#[cfg(feature = "redis-cache")]
pub mod cache;

/// Upstream HTTP clients
pub mod clients;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Infrastructure service implementations
pub mod services;

#[cfg(feature = "redis-cache")]
pub use cache::{RedisClient, RedisProfileCache, RedisRevocationStore};
pub use clients::HttpUserClient;
#[cfg(feature = "mysql")]
pub use database::{DatabasePool, MySqlUserRepository};
pub use services::BcryptPasswordHasher;

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Redis cache error
    #[error("Cache error: {0}")]
    Cache(#[from] redis::RedisError),

    /// HTTP request error for upstream services
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A backend did not answer within its deadline
    #[error("Timed out: {0}")]
    Timeout(String),
}

impl InfrastructureError {
    /// Whether the database rejected a write because of a unique key
    pub fn is_unique_violation(&self) -> bool {
        match self {
            InfrastructureError::Database(sqlx::Error::Database(db)) => {
                // MySQL ER_DUP_ENTRY
                db.code().as_deref() == Some("23000") || db.message().contains("Duplicate entry")
            }
            _ => false,
        }
    }
}

impl From<InfrastructureError> for DomainError {
    fn from(err: InfrastructureError) -> Self {
        if err.is_unique_violation() {
            return DomainError::Conflict {
                message: "email already exists".to_string(),
            };
        }

        match err {
            InfrastructureError::Cache(_)
            | InfrastructureError::Timeout(_)
            | InfrastructureError::Http(_) => DomainError::unavailable(err.to_string()),
            InfrastructureError::Database(
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_),
            ) => DomainError::unavailable(err.to_string()),
            InfrastructureError::Config(message) => DomainError::Configuration { message },
            InfrastructureError::Database(_) => DomainError::internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_and_timeout_errors_are_unavailable() {
        let timeout: DomainError = InfrastructureError::Timeout("GET".into()).into();
        assert!(timeout.is_retryable());

        let redis = redis::RedisError::from((redis::ErrorKind::IoError, "connection refused"));
        let cache: DomainError = InfrastructureError::Cache(redis).into();
        assert!(matches!(cache, DomainError::Unavailable { .. }));
    }

    #[test]
    fn test_pool_timeout_is_unavailable() {
        let err: DomainError = InfrastructureError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(err.is_retryable());
    }

    #[test]
    fn test_row_not_found_is_internal() {
        let err: DomainError = InfrastructureError::Database(sqlx::Error::RowNotFound).into();
        assert!(matches!(err, DomainError::Internal { .. }));
    }

    #[test]
    fn test_config_error_keeps_message() {
        let err: DomainError = InfrastructureError::Config("bad url".into()).into();
        assert_eq!(
            err,
            DomainError::Configuration {
                message: "bad url".into()
            }
        );
    }
}
