//! Redis-backed profile cache: `user:<email>` holds the profile as JSON

use async_trait::async_trait;
use std::time::Duration;
use tracing::warn;

use ms_core::domain::value_objects::UserProfile;
use ms_core::errors::DomainError;
use ms_core::services::{profile_cache_key, ProfileCache};

use super::redis_client::key_label;
use super::RedisClient;

#[derive(Clone)]
pub struct RedisProfileCache {
    client: RedisClient,
}

impl RedisProfileCache {
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProfileCache for RedisProfileCache {
    async fn get(&self, email: &str) -> Result<Option<UserProfile>, DomainError> {
        let key = profile_cache_key(email);
        let Some(raw) = self.client.get(&key).await? else {
            return Ok(None);
        };

        // A payload we cannot read is treated as a miss and overwritten later
        match serde_json::from_str(&raw) {
            Ok(profile) => Ok(Some(profile)),
            Err(e) => {
                warn!("Discarding unreadable cache entry '{}': {}", key_label(&key), e);
                Ok(None)
            }
        }
    }

    async fn put(&self, profile: &UserProfile, ttl: Duration) -> Result<(), DomainError> {
        let payload = serde_json::to_string(profile)
            .map_err(|e| DomainError::internal(format!("serialize profile: {}", e)))?;
        self.client
            .set_with_expiry(&profile_cache_key(&profile.email), &payload, ttl.as_secs().max(1))
            .await?;
        Ok(())
    }

    async fn evict(&self, email: &str) -> Result<(), DomainError> {
        self.client.delete(&profile_cache_key(email)).await?;
        Ok(())
    }
}
