use actix_web::{web, HttpResponse};

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::PasswordHasher;
use ms_shared::JsonResult;

use super::AuthState;
use crate::dto::auth::RefreshTokenRequest;
use crate::handlers::error::refresh_error_response;

/// Handler for POST /auth/refresh
///
/// Exchanges a refresh token for a new pair. A revoked token is refused
/// before its signature or expiry is looked at.
///
/// ## Errors
/// - 401 with `data: {"reason": "missing" | "revoked" | "invalid" | "expired"}`
/// - 503 when the revocation list cannot be consulted
pub async fn refresh<U, R, H>(
    state: web::Data<AuthState<U, R, H>>,
    request: web::Json<RefreshTokenRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    match state.auth_service.refresh(&request.refresh_token).await {
        Ok(auth) => HttpResponse::Ok().json(JsonResult::success(auth, "token refreshed")),
        Err(error) => refresh_error_response(&error),
    }
}
