//! Application factories
//!
//! One factory per service. The binaries call them inside `HttpServer::new`
//! with infrastructure-backed state; the tests call them with in-memory
//! collaborators.

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};
use std::sync::Arc;

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::{AccessGate, PasswordHasher, ProfileCache, UserProfileClient};

use crate::handlers::error::json_error_handler;
use crate::middleware::{JwtAuth, PanicGuard};
use crate::routes::auth::{self, AuthState};
use crate::routes::health::{not_found, ping, revocation_store_health};
use crate::routes::order::{self, OrderState};
use crate::routes::user::{self, UserState};

/// Malformed JSON bodies are answered with the envelope, code `4000`
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Auth service: register, login, refresh, logout
pub fn create_auth_app<U, R, H>(
    state: web::Data<AuthState<U, R, H>>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    App::new()
        .app_data(state)
        .app_data(json_config())
        // innermost first: panic guard, then CORS, then access log
        .wrap(PanicGuard)
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(auth_health::<U, R, H>))
        .service(
            web::scope("/auth")
                .route("/ping", web::get().to(ping))
                .route("/register", web::post().to(auth::register::<U, R, H>))
                .route("/login", web::post().to(auth::login::<U, R, H>))
                .route("/refresh", web::post().to(auth::refresh::<U, R, H>))
                .route("/logout", web::post().to(auth::logout::<U, R, H>)),
        )
        .default_service(web::route().to(not_found))
}

async fn auth_health<U, R, H>(state: web::Data<AuthState<U, R, H>>) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    let store = state.auth_service.revocation().store();
    revocation_store_health("auth-service", &**store).await
}

/// User service: profile read and update behind the auth gate
pub fn create_user_app<U, C>(
    state: web::Data<UserState<U, C>>,
    gate: Arc<dyn AccessGate>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    C: ProfileCache + 'static,
{
    App::new()
        .app_data(state)
        .app_data(json_config())
        .wrap(PanicGuard)
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(user_health::<U, C>))
        .service(
            web::scope("/users")
                .wrap(JwtAuth::new(gate))
                .route("/profile", web::get().to(user::get_profile::<U, C>))
                .route("/profile", web::put().to(user::update_profile::<U, C>)),
        )
        .default_service(web::route().to(not_found))
}

async fn user_health<U, C>(state: web::Data<UserState<U, C>>) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ProfileCache + 'static,
{
    revocation_store_health("user-service", state.revocation_store.as_ref()).await
}

/// Order service: orders enriched with the caller's profile, behind the auth gate
pub fn create_order_app<C>(
    state: web::Data<OrderState<C>>,
    gate: Arc<dyn AccessGate>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    C: UserProfileClient + 'static,
{
    App::new()
        .app_data(state)
        .wrap(PanicGuard)
        .wrap(cors)
        .wrap(Logger::default())
        .route("/health", web::get().to(order_health::<C>))
        .service(
            web::scope("/orders")
                .wrap(JwtAuth::new(gate))
                .route("/{id}", web::get().to(order::get_order::<C>)),
        )
        .default_service(web::route().to(not_found))
}

async fn order_health<C>(state: web::Data<OrderState<C>>) -> HttpResponse
where
    C: UserProfileClient + 'static,
{
    revocation_store_health("order-service", state.revocation_store.as_ref()).await
}
