//! Redis-backed revocation list
//!
//! Entries are plain `SETEX blacklist:<kind>_token:<token> <ttl> "1"` keys,
//! so Redis drops them by itself once the token would have expired anyway.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

use ms_core::domain::entities::TokenKind;
use ms_core::errors::DomainError;
use ms_core::repositories::{revocation_key, RevocationStore};

use super::RedisClient;

/// Revocation store over a shared [`RedisClient`]
#[derive(Clone)]
pub struct RedisRevocationStore {
    client: RedisClient,
}

impl RedisRevocationStore {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

/// Redis rejects a zero expiry, so sub-second remainders round up to one second
pub(crate) fn expiry_seconds(ttl: Duration) -> u64 {
    let secs = ttl.as_secs() + u64::from(ttl.subsec_nanos() > 0);
    secs.max(1)
}

#[async_trait]
impl RevocationStore for RedisRevocationStore {
    async fn revoke(&self, kind: TokenKind, token: &str, ttl: Duration) -> Result<(), DomainError> {
        let seconds = expiry_seconds(ttl);
        self.client
            .set_with_expiry(&revocation_key(kind, token), "1", seconds)
            .await?;
        info!("Revoked {} token for {}s", kind, seconds);
        Ok(())
    }

    async fn is_revoked(&self, kind: TokenKind, token: &str) -> Result<bool, DomainError> {
        let revoked = self.client.exists(&revocation_key(kind, token)).await?;
        debug!("{} token revoked: {}", kind, revoked);
        Ok(revoked)
    }

    async fn ping(&self) -> Result<(), DomainError> {
        match self.client.health_check().await? {
            true => Ok(()),
            false => Err(DomainError::unavailable("Redis answered PING unexpectedly")),
        }
    }
}
