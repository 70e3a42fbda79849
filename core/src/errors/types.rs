//! Error types for token handling and authentication
//!
//! Client-facing wording lives in the presentation layer; these messages are
//! what ends up in logs.

use thiserror::Error;

use crate::domain::entities::token::TokenKind;

/// Token validation and issuance failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Token missing")]
    Missing,

    #[error("Invalid token")]
    Invalid,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token expired")]
    Expired,

    #[error("Wrong token kind: expected {expected}, got {actual}")]
    WrongKind { expected: TokenKind, actual: TokenKind },

    #[error("Token revoked")]
    Revoked,

    #[error("Token signing failed")]
    SigningFailed,
}

impl TokenError {
    /// Coarse reason reported to clients of the refresh endpoint
    pub fn reason(&self) -> &'static str {
        match self {
            TokenError::Missing => "missing",
            TokenError::Revoked => "revoked",
            TokenError::Expired => "expired",
            TokenError::Invalid
            | TokenError::InvalidSignature
            | TokenError::WrongKind { .. }
            | TokenError::SigningFailed => "invalid",
        }
    }
}

/// Credential and account-state failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Email not found")]
    EmailNotFound,

    #[error("Invalid password")]
    InvalidPassword,

    #[error("Account inactive")]
    InactiveAccount,
}
