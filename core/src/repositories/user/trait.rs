//! User repository trait defining the interface for account persistence.
//!
//! The auth service writes accounts through it, the refresh flow re-reads
//! them by email and the user service edits profiles with it. Emails are
//! stored lower-cased; callers pass already-normalized values.

use async_trait::async_trait;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use ms_core::repositories::UserRepository;
/// use ms_core::domain::entities::user::User;
/// use ms_core::errors::DomainError;
///
/// struct MySqlUserRepository {
///     // database connection pool
/// }
///
/// #[async_trait]
/// impl UserRepository for MySqlUserRepository {
///     async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
///         // Implementation here
///         Ok(None)
///     }
///
///     // ... other methods
/// #   async fn find_by_id(&self, _id: u64) -> Result<Option<User>, DomainError> { Ok(None) }
/// #   async fn create(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn update(&self, user: User) -> Result<User, DomainError> { Ok(user) }
/// #   async fn exists_by_email(&self, _email: &str) -> Result<bool, DomainError> { Ok(false) }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by email
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No account uses this email
    /// * `Err(DomainError)` - Storage error
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by id
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, DomainError>;

    /// Persist a new user and return it with its assigned id
    ///
    /// # Errors
    /// * `DomainError::Conflict` - The email is already registered
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite an existing user
    ///
    /// # Errors
    /// * `DomainError::NotFound` - No user with `user.id`
    /// * `DomainError::Conflict` - The new email belongs to another account
    async fn update(&self, user: User) -> Result<User, DomainError>;

    /// Check whether any account uses this email
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
