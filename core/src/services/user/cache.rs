//! Read-through cache of user profiles keyed by email

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::time::Instant;

use crate::domain::value_objects::UserProfile;
use crate::errors::DomainError;

/// How long a cached profile stays fresh
pub const PROFILE_CACHE_TTL: Duration = Duration::from_secs(600);

/// Cache key for the profile of `email`
pub fn profile_cache_key(email: &str) -> String {
    format!("user:{}", email)
}

/// Profile cache; failures are reported but callers treat them as misses
#[async_trait]
pub trait ProfileCache: Send + Sync {
    async fn get(&self, email: &str) -> Result<Option<UserProfile>, DomainError>;

    async fn put(&self, profile: &UserProfile, ttl: Duration) -> Result<(), DomainError>;

    async fn evict(&self, email: &str) -> Result<(), DomainError>;
}

/// Profile cache kept in process memory
#[derive(Clone, Default)]
pub struct InMemoryProfileCache {
    entries: Arc<RwLock<HashMap<String, (UserProfile, Instant)>>>,
}

impl InMemoryProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a fresh entry exists for `email`
    pub async fn contains(&self, email: &str) -> bool {
        matches!(self.get(email).await, Ok(Some(_)))
    }
}

#[async_trait]
impl ProfileCache for InMemoryProfileCache {
    async fn get(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        let entries = self.entries.read().await;
        Ok(entries
            .get(&profile_cache_key(email))
            .filter(|(_, deadline)| *deadline > Instant::now())
            .map(|(profile, _)| profile.clone()))
    }

    async fn put(&self, profile: &UserProfile, ttl: Duration) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            profile_cache_key(&profile.email),
            (profile.clone(), Instant::now() + ttl),
        );
        Ok(())
    }

    async fn evict(&self, email: &str) -> Result<(), DomainError> {
        self.entries.write().await.remove(&profile_cache_key(email));
        Ok(())
    }
}
