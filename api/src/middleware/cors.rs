//! CORS middleware configuration for cross-origin requests.
//!
//! Browsers call the services from the configured front-end origins. In
//! development an empty origin list means "allow any"; production never
//! allows any origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use ms_shared::config::{CorsConfig, Environment};

/// Creates a CORS middleware instance for `environment`
pub fn create_cors(config: &CorsConfig, environment: Environment) -> Cors {
    let mut cors = Cors::default()
        .allowed_methods(vec![
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::ORIGIN,
        ])
        .supports_credentials()
        .max_age(config.max_age);

    if config.allowed_origins.is_empty() && !environment.is_production() {
        log::info!("Configuring permissive CORS for {}", environment);
        return cors.allow_any_origin();
    }

    for origin in &config.allowed_origins {
        log::info!("Adding allowed origin: {}", origin);
        cors = cors.allowed_origin(origin);
    }

    cors
}
