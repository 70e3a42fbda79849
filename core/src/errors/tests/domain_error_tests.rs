//! Unit tests for domain error types

use crate::domain::entities::token::TokenKind;
use crate::errors::{AuthError, DomainError, TokenError};

#[test]
fn test_token_error_reasons() {
    assert_eq!(TokenError::Missing.reason(), "missing");
    assert_eq!(TokenError::Revoked.reason(), "revoked");
    assert_eq!(TokenError::Expired.reason(), "expired");
    assert_eq!(TokenError::InvalidSignature.reason(), "invalid");
    assert_eq!(
        TokenError::WrongKind {
            expected: TokenKind::Refresh,
            actual: TokenKind::Access,
        }
        .reason(),
        "invalid"
    );
}

#[test]
fn test_wrong_kind_message_names_both_kinds() {
    let error = TokenError::WrongKind {
        expected: TokenKind::Access,
        actual: TokenKind::Refresh,
    };
    assert_eq!(error.to_string(), "Wrong token kind: expected access, got refresh");
}

#[test]
fn test_bridged_errors_are_transparent() {
    let error: DomainError = TokenError::Expired.into();
    assert_eq!(error.to_string(), "Token expired");

    let error: DomainError = AuthError::InvalidPassword.into();
    assert!(error.is_unauthenticated());
}

#[test]
fn test_classification() {
    assert!(DomainError::unavailable("redis timeout").is_retryable());
    assert!(!DomainError::internal("boom").is_retryable());
    assert!(!DomainError::Token(TokenError::SigningFailed).is_unauthenticated());
    assert!(DomainError::Token(TokenError::Revoked).is_unauthenticated());
}
