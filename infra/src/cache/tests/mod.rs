//! Tests for the Redis cache layer

mod redis_client_tests;
mod revocation_store_tests;
