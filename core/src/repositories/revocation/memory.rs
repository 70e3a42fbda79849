//! In-memory revocation store with tokio-clock TTLs

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::entities::token::TokenKind;
use crate::errors::DomainError;

use super::trait_::{revocation_key, RevocationStore};

/// Revocation store kept in process memory
///
/// Expiry uses `tokio::time::Instant`, so paused-clock tests can advance past
/// a TTL. `set_available(false)` simulates a store outage.
#[derive(Clone)]
pub struct InMemoryRevocationStore {
    entries: Arc<RwLock<HashMap<String, Instant>>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryRevocationStore {
    fn default() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }
}

impl InMemoryRevocationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle simulated availability; while unavailable every call fails
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Number of live entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|deadline| **deadline > now)
            .count()
    }

    /// Remaining lifetime of an entry, if it is still live
    pub async fn ttl(&self, kind: TokenKind, token: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .get(&revocation_key(kind, token))
            .filter(|deadline| **deadline > now)
            .map(|deadline| *deadline - now)
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::unavailable("revocation store unreachable"))
        }
    }
}

#[async_trait]
impl RevocationStore for InMemoryRevocationStore {
    async fn revoke(&self, kind: TokenKind, token: &str, ttl: Duration) -> Result<(), DomainError> {
        self.check_available()?;

        let now = Instant::now();
        let mut entries = self.entries.write().await;
        entries.retain(|_, deadline| *deadline > now);
        entries.insert(revocation_key(kind, token), now + ttl);
        Ok(())
    }

    async fn is_revoked(&self, kind: TokenKind, token: &str) -> Result<bool, DomainError> {
        self.check_available()?;

        let entries = self.entries.read().await;
        Ok(entries
            .get(&revocation_key(kind, token))
            .is_some_and(|deadline| *deadline > Instant::now()))
    }

    async fn ping(&self) -> Result<(), DomainError> {
        self.check_available()
    }
}
