//! Fixtures shared by the HTTP-level tests
#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, test};
use serde_json::Value;
use std::sync::Arc;

use ms_core::domain::entities::{Role, User};
use ms_core::repositories::{InMemoryRevocationStore, InMemoryUserRepository, UserRepository};
use ms_core::services::{
    AccessGate, AuthGate, AuthService, InMemoryProfileCache, PasswordHasher, RevocationService,
    TokenService, TokenServiceConfig, UserService,
};
use ms_infra::BcryptPasswordHasher;
use ms_shared::config::{CorsConfig, Environment, RevocationFailurePolicy};

pub const SECRET: &str = "integration-test-secret";
pub const ACCESS_TTL: i64 = 900;
pub const REFRESH_TTL: i64 = 86_400;

pub type TestAuthService =
    AuthService<InMemoryUserRepository, InMemoryRevocationStore, BcryptPasswordHasher>;

/// Everything the three apps need, wired over in-memory collaborators
pub struct Fixture {
    pub users: Arc<InMemoryUserRepository>,
    pub store: Arc<InMemoryRevocationStore>,
    pub tokens: Arc<TokenService>,
    pub revocation: Arc<RevocationService<InMemoryRevocationStore>>,
    pub hasher: Arc<BcryptPasswordHasher>,
    pub auth_service: Arc<TestAuthService>,
    pub cache: Arc<InMemoryProfileCache>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_policy(RevocationFailurePolicy::FailClosed)
    }

    pub fn with_policy(policy: RevocationFailurePolicy) -> Self {
        Self::build(policy, ACCESS_TTL, REFRESH_TTL)
    }

    fn build(policy: RevocationFailurePolicy, access_ttl: i64, refresh_ttl: i64) -> Self {
        let users = Arc::new(InMemoryUserRepository::new());
        let store = Arc::new(InMemoryRevocationStore::new());
        let tokens = Arc::new(
            TokenService::new(TokenServiceConfig::new(SECRET, access_ttl, refresh_ttl)).unwrap(),
        );
        let revocation = Arc::new(RevocationService::new(store.clone(), policy));
        // lowest cost bcrypt accepts
        let hasher = Arc::new(BcryptPasswordHasher::new(4));
        let cache = Arc::new(InMemoryProfileCache::new());
        let auth_service = Arc::new(
            AuthService::new(users.clone(), tokens.clone(), revocation.clone(), hasher.clone())
                .with_profile_cache(cache.clone()),
        );

        Self {
            users,
            store,
            tokens,
            revocation,
            hasher,
            auth_service,
            cache,
        }
    }

    pub fn gate(&self) -> Arc<dyn AccessGate> {
        Arc::new(AuthGate::new(self.tokens.clone(), self.revocation.clone()))
    }

    pub fn user_service(&self) -> Arc<UserService<InMemoryUserRepository, InMemoryProfileCache>> {
        Arc::new(UserService::new(self.users.clone(), self.cache.clone()))
    }

    /// Store an active account directly, bypassing the register route
    pub async fn seed_user(&self, email: &str, username: &str, password: &str, role: Role) -> User {
        let hash = self.hasher.hash(password).await.unwrap();
        self.users
            .create(User::new(email, username, hash, role))
            .await
            .unwrap()
    }
}

pub fn cors() -> actix_cors::Cors {
    ms_api::middleware::create_cors(&CorsConfig::default(), Environment::Development)
}

pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {}", token))
}

/// Response status plus its JSON body
pub async fn read_json<B>(resp: ServiceResponse<B>) -> (u16, Value)
where
    B: MessageBody,
{
    let status = resp.status().as_u16();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
