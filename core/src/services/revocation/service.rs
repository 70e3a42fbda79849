//! Revocation writes and checks with an explicit failure policy

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use ms_shared::config::RevocationFailurePolicy;

use crate::domain::entities::token::TokenKind;
use crate::errors::DomainError;
use crate::repositories::RevocationStore;

/// Wraps a revocation store and decides what a store failure means
pub struct RevocationService<R: RevocationStore> {
    store: Arc<R>,
    policy: RevocationFailurePolicy,
}

impl<R: RevocationStore> RevocationService<R> {
    pub fn new(store: Arc<R>, policy: RevocationFailurePolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> RevocationFailurePolicy {
        self.policy
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<R> {
        &self.store
    }

    /// Blacklist `token` for the time it has left
    ///
    /// A zero `remaining` means the token is already dead and nothing is written.
    pub async fn revoke(
        &self,
        kind: TokenKind,
        token: &str,
        remaining: Duration,
    ) -> Result<(), DomainError> {
        if remaining.is_zero() {
            debug!("Skipping revocation of expired {} token", kind);
            return Ok(());
        }
        self.store.revoke(kind, token, remaining).await
    }

    /// Whether `token` has been revoked
    ///
    /// On a store failure, `FailClosed` returns `DomainError::Unavailable` and
    /// `FailOpen` answers `false`.
    pub async fn is_revoked(&self, kind: TokenKind, token: &str) -> Result<bool, DomainError> {
        match self.store.is_revoked(kind, token).await {
            Ok(revoked) => Ok(revoked),
            Err(e) => match self.policy {
                RevocationFailurePolicy::FailClosed => {
                    warn!("Revocation check failed, rejecting request: {}", e);
                    if e.is_retryable() {
                        Err(e)
                    } else {
                        Err(DomainError::unavailable(e.to_string()))
                    }
                }
                RevocationFailurePolicy::FailOpen => {
                    warn!("Revocation check failed, admitting under fail-open policy: {}", e);
                    Ok(false)
                }
            },
        }
    }
}
