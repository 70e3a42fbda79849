use async_trait::async_trait;

use crate::errors::DomainError;

/// One-way password hashing
///
/// Raw passwords only ever pass through this trait; they are not stored or logged.
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Hash a raw password for storage
    async fn hash(&self, password: &str) -> Result<String, DomainError>;

    /// Check a raw password against a stored hash
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError>;
}
