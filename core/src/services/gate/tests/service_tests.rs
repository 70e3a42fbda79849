//! Unit tests for the auth gate

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

use ms_shared::config::RevocationFailurePolicy;

use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};
use crate::repositories::{InMemoryRevocationStore, RevocationStore};
use crate::services::gate::{extract_bearer_token, AccessGate, AdmissionStage, AuthGate};
use crate::services::revocation::RevocationService;
use crate::services::token::{TokenService, TokenServiceConfig};

struct Fixture {
    tokens: Arc<TokenService>,
    store: Arc<InMemoryRevocationStore>,
    gate: AuthGate<InMemoryRevocationStore>,
}

fn fixture(policy: RevocationFailurePolicy) -> Fixture {
    let tokens = Arc::new(TokenService::new(TokenServiceConfig::new("gate-secret", 900, 86400)).unwrap());
    let store = Arc::new(InMemoryRevocationStore::new());
    let revocation = Arc::new(RevocationService::new(store.clone(), policy));
    let gate = AuthGate::new(tokens.clone(), revocation);
    Fixture { tokens, store, gate }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

#[test]
fn test_extract_bearer_token() {
    assert_eq!(extract_bearer_token("Bearer abc"), Some("abc"));
    assert_eq!(extract_bearer_token("Bearer "), None);
    assert_eq!(extract_bearer_token("Basic abc"), None);
    assert_eq!(extract_bearer_token("bearer abc"), None);
    assert_eq!(extract_bearer_token("abc"), None);
}

#[tokio::test]
async fn test_admits_valid_access_token() {
    let f = fixture(RevocationFailurePolicy::FailClosed);
    let pair = f.tokens.issue_pair("a@x.com", 5, Role::Admin).unwrap();

    let claims = f.gate.admit(Some(&bearer(&pair.access_token))).await.unwrap();
    assert_eq!(claims.user_id, 5);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.role, Role::Admin);
}

#[tokio::test]
async fn test_rejects_missing_or_malformed_header() {
    let f = fixture(RevocationFailurePolicy::FailClosed);

    for header in [None, Some("Token abc"), Some("Bearer ")] {
        let rejection = f.gate.admit(header).await.unwrap_err();
        assert_eq!(rejection.stage, AdmissionStage::Format);
        assert_eq!(rejection.error, DomainError::Token(TokenError::Missing));
    }
}

#[tokio::test]
async fn test_rejects_refresh_token_at_kind_stage() {
    let f = fixture(RevocationFailurePolicy::FailClosed);
    let pair = f.tokens.issue_pair("a@x.com", 5, Role::User).unwrap();

    let rejection = f.gate.admit(Some(&bearer(&pair.refresh_token))).await.unwrap_err();
    assert_eq!(rejection.stage, AdmissionStage::Kind);
}

#[tokio::test]
async fn test_revocation_checked_before_signature() {
    let f = fixture(RevocationFailurePolicy::FailClosed);
    let expired = encode(
        &Header::default(),
        &json!({"email": "a@x.com", "userId": 1, "role": "User", "exp": Utc::now().timestamp() - 60}),
        &EncodingKey::from_secret(b"gate-secret"),
    )
    .unwrap();
    f.store
        .revoke(TokenKind::Access, &expired, Duration::from_secs(60))
        .await
        .unwrap();

    let rejection = f.gate.admit(Some(&bearer(&expired))).await.unwrap_err();
    assert_eq!(rejection.stage, AdmissionStage::Revocation);
    assert_eq!(rejection.error, DomainError::Token(TokenError::Revoked));
}

#[tokio::test]
async fn test_store_outage_fail_closed() {
    let f = fixture(RevocationFailurePolicy::FailClosed);
    let pair = f.tokens.issue_pair("a@x.com", 1, Role::User).unwrap();
    f.store.set_available(false);

    let rejection = f.gate.admit(Some(&bearer(&pair.access_token))).await.unwrap_err();
    assert_eq!(rejection.stage, AdmissionStage::Revocation);
    assert!(rejection.error.is_retryable());
}

#[tokio::test]
async fn test_store_outage_fail_open() {
    let f = fixture(RevocationFailurePolicy::FailOpen);
    let pair = f.tokens.issue_pair("a@x.com", 1, Role::User).unwrap();
    f.store.set_available(false);

    assert!(f.gate.admit(Some(&bearer(&pair.access_token))).await.is_ok());
}

#[tokio::test]
async fn test_forged_token_rejected_at_signature_stage() {
    let f = fixture(RevocationFailurePolicy::FailClosed);
    let forged = encode(
        &Header::default(),
        &json!({"email": "a@x.com", "userId": 1, "role": "SuperAdmin", "exp": Utc::now().timestamp() + 60}),
        &EncodingKey::from_secret(b"attacker"),
    )
    .unwrap();

    let rejection = f.gate.admit(Some(&bearer(&forged))).await.unwrap_err();
    assert_eq!(rejection.stage, AdmissionStage::Signature);
    assert_eq!(rejection.error, DomainError::Token(TokenError::InvalidSignature));
}
