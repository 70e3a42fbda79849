//! Tests for the Redis revocation store and profile cache

use std::time::Duration;

use ms_core::domain::entities::{Role, TokenKind};
use ms_core::domain::value_objects::UserProfile;
use ms_core::repositories::RevocationStore;
use ms_core::services::ProfileCache;

use crate::cache::revocation_store::expiry_seconds;
use crate::cache::{CacheConfig, RedisClient, RedisProfileCache, RedisRevocationStore};

async fn client() -> RedisClient {
    let url = std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost:6379".to_string());
    RedisClient::new(CacheConfig::new(url).with_prefix("ms_infra_test"))
        .await
        .unwrap()
}

#[test]
fn test_expiry_rounds_up_to_whole_seconds() {
    assert_eq!(expiry_seconds(Duration::from_secs(900)), 900);
    assert_eq!(expiry_seconds(Duration::from_millis(1500)), 2);
    assert_eq!(expiry_seconds(Duration::from_millis(10)), 1);
    assert_eq!(expiry_seconds(Duration::ZERO), 1);
}

#[tokio::test]
#[ignore] // Requires running Redis
async fn test_revoke_then_check() {
    let store = RedisRevocationStore::new(client().await);
    let token = format!("token-{}", chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default());

    assert!(!store.is_revoked(TokenKind::Access, &token).await.unwrap());
    store
        .revoke(TokenKind::Access, &token, Duration::from_secs(5))
        .await
        .unwrap();

    assert!(store.is_revoked(TokenKind::Access, &token).await.unwrap());
    assert!(!store.is_revoked(TokenKind::Refresh, &token).await.unwrap());
    store.ping().await.unwrap();
}

#[tokio::test]
#[ignore] // Requires running Redis
async fn test_profile_cache_round_trip() {
    let cache = RedisProfileCache::new(client().await);
    let profile = UserProfile {
        id: 7,
        email: "cache-probe@example.com".to_string(),
        username: "probe01".to_string(),
        role: Role::User,
    };

    cache.put(&profile, Duration::from_secs(30)).await.unwrap();
    assert_eq!(cache.get(&profile.email).await.unwrap(), Some(profile.clone()));

    cache.evict(&profile.email).await.unwrap();
    assert_eq!(cache.get(&profile.email).await.unwrap(), None);
}
