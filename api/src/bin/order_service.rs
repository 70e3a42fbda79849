//! Order service: orders enriched with the caller's profile

use actix_web::{web, HttpServer};
use dotenv::dotenv;
use log::info;
use std::sync::Arc;

use ms_api::app::create_order_app;
use ms_api::config::{self, ServiceKind};
use ms_api::middleware::create_cors;
use ms_api::routes::order::OrderState;
use ms_core::repositories::RevocationStore;
use ms_core::services::{AccessGate, AuthGate, OrderService, RevocationService, TokenService, TokenServiceConfig};
use ms_infra::{HttpUserClient, RedisClient, RedisRevocationStore};
use ms_shared::Environment;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(
        env_logger::Env::new().default_filter_or(Environment::from_env().default_log_filter()),
    );

    let config = config::load(ServiceKind::Order)?;
    info!(
        "Starting order service ({}), user service at {}",
        config.environment, config.upstream.user_service_url
    );

    let redis = RedisClient::new(config.cache.clone()).await?;
    let store = Arc::new(RedisRevocationStore::new(redis));

    let tokens = Arc::new(TokenService::new(TokenServiceConfig::from(config.auth.jwt.clone()))?);
    let revocation = Arc::new(RevocationService::new(store.clone(), config.auth.revocation_policy));
    let gate: Arc<dyn AccessGate> = Arc::new(AuthGate::new(tokens, revocation));
    let health_store: Arc<dyn RevocationStore> = store;

    let users = Arc::new(HttpUserClient::from_config(&config.upstream)?);
    let order_service = Arc::new(OrderService::new(users));
    let state = web::Data::new(OrderState::new(order_service, health_store));

    let bind_address = config.server.bind_address();
    info!("Order service listening on {}", bind_address);

    let cors_config = config.cors.clone();
    let environment = config.environment;
    let mut server = HttpServer::new(move || {
        create_order_app(state.clone(), gate.clone(), create_cors(&cors_config, environment))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;
    Ok(())
}
