//! User service: profile read and update behind the auth gate

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use ms_api::app::create_user_app;
use ms_api::config::{self, ServiceKind};
use ms_api::middleware::create_cors;
use ms_api::routes::user::UserState;
use ms_core::repositories::RevocationStore;
use ms_core::services::{AccessGate, AuthGate, RevocationService, TokenService, TokenServiceConfig, UserService};
use ms_infra::{DatabasePool, MySqlUserRepository, RedisClient, RedisProfileCache, RedisRevocationStore};
use ms_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(Environment::from_env().default_log_filter()),
    );

    let config = config::load(ServiceKind::User)?;
    info!("Starting user service ({})", config.environment);

    let pool = DatabasePool::new(config.database.clone()).await?;
    pool.ensure_schema().await?;
    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    let redis = RedisClient::new(config.cache.clone()).await?;
    let store = Arc::new(RedisRevocationStore::new(redis.clone()));
    let cache = Arc::new(RedisProfileCache::new(redis));

    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(config.auth.jwt.clone()))?);
    let revocation = Arc::new(RevocationService::new(store.clone(), config.auth.revocation_policy));
    let gate: Arc<dyn AccessGate> = Arc::new(AuthGate::new(tokens, revocation));
    let health_store: Arc<dyn RevocationStore> = store;

    let user_service = Arc::new(UserService::new(users, cache));
    let state = web::Data::new(UserState::new(user_service, health_store));

    let bind_address = config.server.bind_address();
    info!("User service listening on {}", bind_address);

    let cors_config = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || {
        create_user_app(state.clone(), gate.clone(), create_cors(&cors_config, environment))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
