//! Profile reads and edits for the authenticated account

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::entities::user::normalize_email;
use crate::domain::value_objects::UserProfile;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::UserRepository;

use super::cache::{ProfileCache, PROFILE_CACHE_TTL};

/// Requested profile edits; `None` leaves a field untouched
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// Result of a profile update
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub profile: UserProfile,
    /// `false` when every requested value equalled the current one
    pub changed: bool,
}

/// User service for profile management
pub struct UserService<U, C>
where
    U: UserRepository,
    C: ProfileCache,
{
    user_repository: Arc<U>,
    cache: Arc<C>,
}

impl<U, C> UserService<U, C>
where
    U: UserRepository,
    C: ProfileCache,
{
    pub fn new(user_repository: Arc<U>, cache: Arc<C>) -> Self {
        Self {
            user_repository,
            cache,
        }
    }

    /// Profile of the account identified by an access token
    ///
    /// The cache is keyed by the token's email; a cached entry is only used
    /// when it belongs to `user_id`. Cache errors degrade to a database read.
    pub async fn get_profile(&self, user_id: u64, email: &str) -> DomainResult<UserProfile> {
        match self.cache.get(email).await {
            Ok(Some(profile)) if profile.id == user_id => {
                debug!("Profile cache hit for user {}", user_id);
                return Ok(profile);
            }
            Ok(_) => {}
            Err(e) => warn!("Profile cache read failed: {}", e),
        }

        let user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", user_id),
            })?;

        let profile = UserProfile::from(&user);
        self.cache_profile(&profile).await;
        Ok(profile)
    }

    /// Apply username/email edits to the account
    ///
    /// # Errors
    ///
    /// * `DomainError::Validation` - no field supplied
    /// * `DomainError::NotFound` - the account no longer exists
    /// * `DomainError::Conflict` - the new email belongs to another account
    pub async fn update_profile(
        &self,
        user_id: u64,
        changes: ProfileChanges,
    ) -> DomainResult<ProfileUpdate> {
        if changes.username.is_none() && changes.email.is_none() {
            return Err(DomainError::validation("no fields to update"));
        }

        let mut user = self
            .user_repository
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::NotFound {
                resource: format!("user {}", user_id),
            })?;
        let old_email = user.email.clone();

        let mut changed = false;
        if let Some(email) = changes.email.as_deref() {
            let email = normalize_email(email);
            if email != user.email && self.user_repository.exists_by_email(&email).await? {
                return Err(DomainError::Conflict {
                    message: "email already in use".to_string(),
                });
            }
            changed |= user.change_email(&email);
        }
        if let Some(username) = changes.username.as_deref() {
            changed |= user.change_username(username);
        }

        if !changed {
            return Ok(ProfileUpdate {
                profile: UserProfile::from(&user),
                changed: false,
            });
        }

        let user = self.user_repository.update(user).await?;
        let profile = UserProfile::from(&user);

        if profile.email != old_email {
            if let Err(e) = self.cache.evict(&old_email).await {
                warn!("Failed to evict stale profile cache entry: {}", e);
            }
        }
        self.cache_profile(&profile).await;

        info!("Updated profile of user {}", user_id);
        Ok(ProfileUpdate {
            profile,
            changed: true,
        })
    }

    async fn cache_profile(&self, profile: &UserProfile) {
        if let Err(e) = self.cache.put(profile, PROFILE_CACHE_TTL).await {
            warn!("Failed to cache profile of user {}: {}", profile.id, e);
        }
    }
}
