//! Authentication route handlers
//!
//! - Registration and password login
//! - Token refresh
//! - Logout (revokes both presented tokens)

pub mod login;
pub mod logout;
pub mod refresh;
pub mod register;

use std::sync::Arc;

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::{AuthService, PasswordHasher};

pub use login::login;
pub use logout::logout;
pub use refresh::refresh;
pub use register::register;

/// Application state that holds the auth service
pub struct AuthState<U, R, H>
where
    U: UserRepository,
    R: RevocationStore,
    H: PasswordHasher,
{
    pub auth_service: Arc<AuthService<U, R, H>>,
}

impl<U, R, H> AuthState<U, R, H>
where
    U: UserRepository,
    R: RevocationStore,
    H: PasswordHasher,
{
    pub fn new(auth_service: Arc<AuthService<U, R, H>>) -> Self {
        Self { auth_service }
    }
}
