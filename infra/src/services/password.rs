//! bcrypt implementation of [`PasswordHasher`]
//!
//! bcrypt is deliberately slow, so both operations run on the blocking
//! thread pool instead of stalling the async workers.

use async_trait::async_trait;
use tracing::error;

use ms_core::errors::DomainError;
use ms_core::services::PasswordHasher;

#[derive(Debug, Clone, Copy)]
pub struct BcryptPasswordHasher {
    cost: u32,
}

impl BcryptPasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }
}

impl Default for BcryptPasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

fn join_error(e: tokio::task::JoinError) -> DomainError {
    error!("Password hashing task failed: {}", e);
    DomainError::internal("password hashing task failed")
}

#[async_trait]
impl PasswordHasher for BcryptPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, DomainError> {
        let password = password.to_string();
        let cost = self.cost;

        tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .map_err(join_error)?
            .map_err(|e| DomainError::internal(format!("bcrypt hash failed: {}", e)))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, DomainError> {
        let password = password.to_string();
        let hash = hash.to_string();

        let verified = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(join_error)?;

        // A stored value that is not a bcrypt hash can never match
        Ok(verified.unwrap_or(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> BcryptPasswordHasher {
        // lowest cost bcrypt accepts
        BcryptPasswordHasher::new(4)
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let hasher = hasher();
        let hash = hasher.hash("Secret123").await.unwrap();

        assert_ne!(hash, "Secret123");
        assert!(hash.starts_with("$2"));
        assert!(hasher.verify("Secret123", &hash).await.unwrap());
        assert!(!hasher.verify("secret123", &hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_same_password_hashes_differently() {
        let hasher = hasher();
        let first = hasher.hash("Secret123").await.unwrap();
        let second = hasher.hash("Secret123").await.unwrap();
        assert_ne!(first, second);
    }

    #[tokio::test]
    async fn test_malformed_hash_never_matches() {
        assert!(!hasher().verify("Secret123", "not-a-hash").await.unwrap());
    }

    #[test]
    fn test_default_cost() {
        assert_eq!(BcryptPasswordHasher::default().cost(), bcrypt::DEFAULT_COST);
    }
}
