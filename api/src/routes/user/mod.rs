//! User service routes, all behind the auth gate

pub mod profile;

use std::sync::Arc;

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::{ProfileCache, UserService};

pub use profile::{get_profile, update_profile};

pub struct UserState<U, C>
where
    U: UserRepository,
    C: ProfileCache,
{
    pub user_service: Arc<UserService<U, C>>,
    /// Probed by `/health`
    pub revocation_store: Arc<dyn RevocationStore>,
}

impl<U, C> UserState<U, C>
where
    U: UserRepository,
    C: ProfileCache,
{
    pub fn new(user_service: Arc<UserService<U, C>>, revocation_store: Arc<dyn RevocationStore>) -> Self {
        Self {
            user_service,
            revocation_store,
        }
    }
}
