//! Auth service: registration, login, refresh and logout

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use ms_api::app::create_auth_app;
use ms_api::config::{self, ServiceKind};
use ms_api::middleware::create_cors;
use ms_api::routes::auth::AuthState;
use ms_core::services::{AuthService, ProfileCache, RevocationService, TokenService, TokenServiceConfig};
use ms_infra::{
    BcryptPasswordHasher, DatabasePool, MySqlUserRepository, RedisClient, RedisProfileCache,
    RedisRevocationStore,
};
use ms_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(Environment::from_env().default_log_filter()),
    );

    let config = config::load(ServiceKind::Auth)?;
    info!("Starting auth service ({})", config.environment);

    let pool = DatabasePool::new(config.database.clone()).await?;
    pool.ensure_schema().await?;
    let users = Arc::new(MySqlUserRepository::new(pool.get_pool().clone()));

    let redis = RedisClient::new(config.cache.clone()).await?;
    let store = Arc::new(RedisRevocationStore::new(redis.clone()));
    let profile_cache: Arc<dyn ProfileCache> = Arc::new(RedisProfileCache::new(redis));
    let revocation = Arc::new(RevocationService::new(store, config.auth.revocation_policy));
    info!("Revocation failure policy: {:?}", config.auth.revocation_policy);

    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(config.auth.jwt.clone()))?);
    let auth_service = Arc::new(
        AuthService::new(
            users,
            tokens,
            revocation,
            Arc::new(BcryptPasswordHasher::default()),
        )
        .with_profile_cache(profile_cache),
    );
    let state = web::Data::new(AuthState::new(auth_service));

    let bind_address = config.server.bind_address();
    info!("Auth service listening on {}", bind_address);

    let cors_config = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || {
        create_auth_app(state.clone(), create_cors(&cors_config, environment))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
