//! Cache module for Redis-backed storage
//!
//! One multiplexed Redis connection serves both the token revocation list
//! and the profile cache.

pub mod profile_cache;
pub mod redis_client;
pub mod revocation_store;

#[cfg(test)]
mod tests;

pub use profile_cache::RedisProfileCache;
pub use redis_client::RedisClient;
pub use revocation_store::RedisRevocationStore;

// Re-export commonly used types
pub use ms_shared::config::CacheConfig;
