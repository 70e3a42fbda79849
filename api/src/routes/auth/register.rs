use actix_web::{web, HttpResponse};
use validator::Validate;

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::PasswordHasher;
use ms_shared::JsonResult;

use super::AuthState;
use crate::dto::auth::RegisterRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};

/// Handler for POST /auth/register
///
/// # Request Body
///
/// ```json
/// { "email": "a@x.com", "username": "alice01", "password": "Abc123", "role": "User" }
/// ```
///
/// ## Errors
/// - 400 (`4001`): a field failed validation, `data` maps field to message
/// - 409 (`4002`): the email is already registered
pub async fn register<U, R, H>(
    state: web::Data<AuthState<U, R, H>>,
    request: web::Json<RegisterRequest>,
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
        .register(request.into_inner().into_account())
        .await
    {
        Ok(profile) => {
            log::info!("Registered account {}", profile.id);
            HttpResponse::Ok().json(JsonResult::success(profile, "registration successful"))
        }
        Err(error) => handle_domain_error(&error),
    }
}
