//! User service module: profile reads through a cache and profile edits

mod cache;
mod service;


pub use cache::{profile_cache_key, InMemoryProfileCache, ProfileCache, PROFILE_CACHE_TTL};
pub use service::{ProfileChanges, ProfileUpdate, UserService};
