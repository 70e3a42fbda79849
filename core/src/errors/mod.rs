//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

pub use types::{AuthError, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    /// A dependency (Redis, MySQL, upstream service) did not answer; the caller may retry
    #[error("Service unavailable: {message}")]
    Unavailable { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation { message: message.into() }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        DomainError::Unavailable { message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        DomainError::Internal { message: message.into() }
    }

    /// Whether repeating the same request later may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, DomainError::Unavailable { .. })
    }

    /// Whether the error means the caller is not authenticated
    pub fn is_unauthenticated(&self) -> bool {
        matches!(
            self,
            DomainError::Auth(_) | DomainError::Token(_)
        ) && !matches!(self, DomainError::Token(TokenError::SigningFailed))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
