//! Revocation store: the server-side blacklist of logged-out tokens.
//!
//! An entry maps `blacklist:<kind>_token:<token>` to `"1"` and expires on its
//! own when the token would have expired anyway, so the store never needs a
//! delete path.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::entities::token::TokenKind;
use crate::errors::DomainError;

/// Key under which a revoked token is recorded
pub fn revocation_key(kind: TokenKind, token: &str) -> String {
    format!("blacklist:{}_token:{}", kind.as_str(), token)
}

/// Key-value blacklist with per-entry TTL
///
/// Implementations must map connection failures and timeouts to
/// `DomainError::Unavailable`, never to "not revoked".
#[async_trait]
pub trait RevocationStore: Send + Sync {
    /// Record `token` as revoked for `ttl`
    ///
    /// Writing an entry that already exists only refreshes its TTL.
    async fn revoke(&self, kind: TokenKind, token: &str, ttl: Duration) -> Result<(), DomainError>;

    /// Whether an unexpired entry exists for `token`
    async fn is_revoked(&self, kind: TokenKind, token: &str) -> Result<bool, DomainError>;

    /// Round trip to the backing store, used by health checks
    async fn ping(&self) -> Result<(), DomainError> {
        Ok(())
    }
}
