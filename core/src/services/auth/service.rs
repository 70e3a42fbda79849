//! Main authentication service implementation

use std::sync::Arc;
use tracing::{error, info, warn};

use crate::domain::entities::token::TokenKind;
use crate::domain::entities::user::{normalize_email, Role, User};
use crate::domain::value_objects::{AuthResponse, UserProfile};
use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{RevocationStore, UserRepository};
use crate::services::revocation::RevocationService;
use crate::services::token::TokenService;
use crate::services::user::{ProfileCache, PROFILE_CACHE_TTL};

use super::password::PasswordHasher;

/// Registration input, already validated field by field
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

/// What logout actually wrote to the revocation store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogoutReport {
    pub access_revoked: bool,
    pub refresh_revoked: bool,
}

/// Authentication service for the complete session lifecycle
pub struct AuthService<U, R, H>
where
    U: UserRepository,
    R: RevocationStore,
    H: PasswordHasher,
{
    /// User repository for account lookups
    user_repository: Arc<U>,
    /// Token service for JWT issuance and verification
    token_service: Arc<TokenService>,
    /// Revocation list with its failure policy
    revocation: Arc<RevocationService<R>>,
    /// Password hashing
    hasher: Arc<H>,
    /// Warmed with the profile at login so the first profile read skips the database
    profile_cache: Option<Arc<dyn ProfileCache>>,
}

impl<U, R, H> AuthService<U, R, H>
where
    U: UserRepository,
    R: RevocationStore,
    H: PasswordHasher,
{
    /// Create a new authentication service
    ///
    /// # Arguments
    ///
    /// * `user_repository` - Repository for user data persistence
    /// * `token_service` - Service for JWT token management
    /// * `revocation` - Revocation list shared with the auth gate
    /// * `hasher` - Password hashing implementation
    pub fn new(
        user_repository: Arc<U>,
        token_service: Arc<TokenService>,
        revocation: Arc<RevocationService<R>>,
        hasher: Arc<H>,
    ) -> Self {
        Self {
            user_repository,
            token_service,
            revocation,
            hasher,
            profile_cache: None,
        }
    }

    /// Write the caller's profile to `cache` on every successful login
    pub fn with_profile_cache(mut self, cache: Arc<dyn ProfileCache>) -> Self {
        self.profile_cache = Some(cache);
        self
    }

    pub fn token_service(&self) -> &Arc<TokenService> {
        &self.token_service
    }

    pub fn revocation(&self) -> &Arc<RevocationService<R>> {
        &self.revocation
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// `DomainError::Conflict` when the email is already registered.
    pub async fn register(&self, account: NewAccount) -> DomainResult<UserProfile> {
        let email = normalize_email(&account.email);

        // Step 1: Reject duplicate emails before paying for a hash
        if self.user_repository.exists_by_email(&email).await? {
            return Err(DomainError::Conflict {
                message: "email already registered".to_string(),
            });
        }

        // Step 2: Hash the password and persist
        let password_hash = self.hasher.hash(&account.password).await?;
        let user = User::new(email, account.username, password_hash, account.role);
        let user = self.user_repository.create(user).await?;

        info!("Registered user {} with role {}", user.id, user.role);
        Ok(UserProfile::from(&user))
    }

    /// Check credentials and issue a token pair
    ///
    /// Unknown email and wrong password are distinct errors here; the HTTP
    /// layer reports both with the same message.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        // Step 1: Look up the account
        let user = self
            .user_repository
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::EmailNotFound)?;

        // Step 2: Check the password
        if !self.hasher.verify(password, &user.password_hash).await? {
            return Err(AuthError::InvalidPassword.into());
        }

        // Step 3: Inactive accounts cannot start a session
        if !user.is_active {
            return Err(AuthError::InactiveAccount.into());
        }

        // Step 4: Issue the pair
        let pair = self
            .token_service
            .issue_pair(&user.email, user.id, user.role)
            .map_err(|e| {
                error!("Failed to issue tokens for user {}: {}", user.id, e);
                e
            })?;

        // Step 5: Warm the profile cache; a failure only costs a database read later
        if let Some(cache) = &self.profile_cache {
            if let Err(e) = cache.put(&UserProfile::from(&user), PROFILE_CACHE_TTL).await {
                warn!("Failed to cache profile of user {}: {}", user.id, e);
            }
        }

        info!("User {} logged in", user.id);
        Ok(AuthResponse::from_token_pair(pair, &user))
    }

    /// Exchange a refresh token for a new pair
    ///
    /// The revocation list is consulted before the signature, so a revoked
    /// token is reported as revoked even when it is also expired or forged.
    /// The presented refresh token stays valid until it expires or is logged out.
    pub async fn refresh(&self, refresh_token: &str) -> DomainResult<AuthResponse> {
        // Step 1: Presence
        if refresh_token.is_empty() {
            return Err(TokenError::Missing.into());
        }

        // Step 2: Revocation list
        if self
            .revocation
            .is_revoked(TokenKind::Refresh, refresh_token)
            .await?
        {
            return Err(TokenError::Revoked.into());
        }

        // Step 3: Signature, expiry and kind
        let claims = self.token_service.verify_refresh(refresh_token)?;

        // Step 4: Re-resolve the account so the new pair carries the current role
        let user = match self.user_repository.find_by_email(&claims.email).await? {
            Some(user) if user.is_active => user,
            Some(_) => {
                warn!("Refresh refused for inactive account {}", claims.email);
                return Err(TokenError::Invalid.into());
            }
            None => {
                warn!("Refresh refused for unknown account {}", claims.email);
                return Err(TokenError::Invalid.into());
            }
        };

        // Step 5: Issue the new pair
        let pair = self
            .token_service
            .issue_pair(&user.email, user.id, user.role)?;

        Ok(AuthResponse::from_token_pair(pair, &user))
    }

    /// Blacklist both tokens for the time they have left
    ///
    /// Never fails: unparseable or expired tokens are skipped and store
    /// errors are logged. Each token is revoked under the kind of the field
    /// it was submitted in.
    pub async fn logout(&self, access_token: &str, refresh_token: &str) -> LogoutReport {
        LogoutReport {
            access_revoked: self.revoke_remaining(TokenKind::Access, access_token).await,
            refresh_revoked: self.revoke_remaining(TokenKind::Refresh, refresh_token).await,
        }
    }

    async fn revoke_remaining(&self, kind: TokenKind, token: &str) -> bool {
        if token.is_empty() {
            return false;
        }

        let Some(remaining) = self.token_service.remaining_ttl(token) else {
            info!("Skipping {} token at logout: expired or unparseable", kind);
            return false;
        };

        match self.revocation.revoke(kind, token, remaining).await {
            Ok(()) => true,
            Err(e) => {
                error!("Failed to revoke {} token at logout: {}", kind, e);
                false
            }
        }
    }
}
