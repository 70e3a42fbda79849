use actix_web::{web, HttpResponse};
use validator::Validate;

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::PasswordHasher;
use ms_shared::JsonResult;

use super::AuthState;
use crate::dto::auth::LoginRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /auth/login
///
/// ## Success (200 OK)
/// `data` is `{id, email, username, role, access_token, refresh_token}`.
///
/// ## Errors
/// - 401: unknown email or wrong password, both reported as
///   "invalid email or password"
pub async fn login<U, R, H>(
    state: web::Data<AuthState<U, R, H>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .auth_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(auth) => HttpResponse::Ok().json(JsonResult::success(auth, "login successful")),
        Err(error) => handle_domain_error(&error),
    }
}
