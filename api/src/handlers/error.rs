//! Translation of domain errors into the JSON envelope
//!
//! Every failure a client sees goes through [`handle_domain_error`], so the
//! status code, the `status_code` field and the wording stay consistent
//! across the three services.

use actix_web::{error::InternalError, error::JsonPayloadError, HttpRequest, HttpResponse};
use serde_json::json;
use std::collections::HashMap;
use validator::ValidationErrors;

use ms_core::errors::{AuthError, DomainError, TokenError};
use ms_shared::error_codes;
use ms_shared::JsonResult;

/// Client wording for bad credentials; which half was wrong is only logged
pub const INVALID_CREDENTIALS: &str = "invalid email or password";

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Validation { message } => HttpResponse::BadRequest()
            .json(JsonResult::failure(error_codes::INVALID_PARAMETERS, message.as_str())),

        DomainError::Conflict { message } => {
            HttpResponse::Conflict().json(JsonResult::failure(error_codes::EMAIL_EXISTS, message.as_str()))
        }

        DomainError::NotFound { resource } => HttpResponse::NotFound().json(JsonResult::failure(
            error_codes::NOT_FOUND,
            format!("{} not found", resource),
        )),

        DomainError::Unavailable { message } => {
            log::warn!("Dependency unavailable: {}", message);
            HttpResponse::ServiceUnavailable().json(JsonResult::failure(
                error_codes::SERVICE_UNAVAILABLE,
                "a backing service is unavailable, retry later",
            ))
        }

        DomainError::Auth(auth_error) => {
            log::info!("Authentication failed: {}", auth_error);
            let detail = match auth_error {
                AuthError::EmailNotFound | AuthError::InvalidPassword => INVALID_CREDENTIALS,
                AuthError::InactiveAccount => "account is disabled",
            };
            HttpResponse::Unauthorized().json(JsonResult::failure(error_codes::UNAUTHORIZED, detail))
        }

        DomainError::Token(TokenError::SigningFailed)
        | DomainError::Configuration { .. }
        | DomainError::Internal { .. } => {
            log::error!("Internal error: {}", error);
            HttpResponse::InternalServerError().json(JsonResult::failure(
                error_codes::INTERNAL_ERROR,
                "internal server error",
            ))
        }

        DomainError::Token(token_error) => HttpResponse::Unauthorized()
            .json(JsonResult::failure(error_codes::UNAUTHORIZED, token_error.to_string())),
    }
}

/// Refresh failures carry the coarse reason in `data`
pub fn refresh_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::Token(token_error) if *token_error != TokenError::SigningFailed => {
            log::info!("Refresh rejected: {}", token_error);
            HttpResponse::Unauthorized().json(JsonResult::error_with_data(
                error_codes::UNAUTHORIZED,
                token_error.to_string(),
                json!({ "reason": token_error.reason() }),
            ))
        }
        _ => handle_domain_error(error),
    }
}

/// 400 with `data` mapping each invalid field to its first message
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let fields: HashMap<String, String> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let message = errs
                .first()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .unwrap_or_default();
            (field.to_string(), message)
        })
        .collect();

    log::debug!("Validation failed: {:?}", fields);

    HttpResponse::BadRequest().json(JsonResult::error_with_data(
        error_codes::INVALID_PARAMETERS,
        "invalid parameters",
        fields,
    ))
}

/// `web::JsonConfig` error handler: malformed bodies get the envelope too
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let detail = err.to_string();
    log::debug!("Rejected request body: {}", detail);
    let response =
        HttpResponse::BadRequest().json(JsonResult::failure(error_codes::BAD_REQUEST, detail));
    InternalError::from_response(err, response).into()
}
