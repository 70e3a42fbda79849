use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::entities::token::{AccessClaims, TokenKind};
use crate::errors::{DomainError, TokenError};
use crate::repositories::RevocationStore;
use crate::services::revocation::RevocationService;
use crate::services::token::TokenService;

/// Stage at which a request was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionStage {
    Format,
    Revocation,
    Signature,
    Kind,
}

impl std::fmt::Display for AdmissionStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AdmissionStage::Format => "format",
            AdmissionStage::Revocation => "revocation",
            AdmissionStage::Signature => "signature",
            AdmissionStage::Kind => "kind",
        };
        f.write_str(name)
    }
}

/// Why a request was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GateRejection {
    pub stage: AdmissionStage,
    pub error: DomainError,
}

impl GateRejection {
    fn new(stage: AdmissionStage, error: impl Into<DomainError>) -> Self {
        Self {
            stage,
            error: error.into(),
        }
    }
}

/// Admission decision for one `Authorization` header value
#[async_trait]
pub trait AccessGate: Send + Sync {
    async fn admit(&self, authorization: Option<&str>) -> Result<AccessClaims, GateRejection>;
}

/// Returns the token of a `Bearer <token>` header, `None` for anything else
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Composes the token verifier with the revocation list
pub struct AuthGate<R: RevocationStore> {
    tokens: Arc<TokenService>,
    revocation: Arc<RevocationService<R>>,
}

impl<R: RevocationStore> AuthGate<R> {
    pub fn new(tokens: Arc<TokenService>, revocation: Arc<RevocationService<R>>) -> Self {
        Self { tokens, revocation }
    }
}

#[async_trait]
impl<R: RevocationStore + 'static> AccessGate for AuthGate<R> {
    async fn admit(&self, authorization: Option<&str>) -> Result<AccessClaims, GateRejection> {
        // Step 1: header format
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or_else(|| GateRejection::new(AdmissionStage::Format, TokenError::Missing))?;

        // Step 2: revocation list, before any signature work
        let revoked = self
            .revocation
            .is_revoked(TokenKind::Access, token)
            .await
            .map_err(|e| GateRejection::new(AdmissionStage::Revocation, e))?;
        if revoked {
            return Err(GateRejection::new(AdmissionStage::Revocation, TokenError::Revoked));
        }

        // Steps 3 and 4: signature/expiry, then kind
        let claims = self.tokens.verify_access(token).map_err(|e| {
            let stage = match e {
                DomainError::Token(TokenError::WrongKind { .. }) => AdmissionStage::Kind,
                _ => AdmissionStage::Signature,
            };
            GateRejection::new(stage, e)
        })?;

        debug!("Admitted user {} ({})", claims.user_id, claims.role);
        Ok(claims)
    }
}
