use actix_web::{web, HttpResponse};
use validator::Validate;

use ms_core::repositories::UserRepository;
use ms_core::services::ProfileCache;
use ms_shared::JsonResult;

use super::UserState;
use crate::dto::user::UpdateProfileRequest;
use crate::handlers::error::{handle_domain_error, validation_error_response};
use crate::middleware::auth::AuthContext;

/// Handler for GET /users/profile
pub async fn get_profile<U, C>(state: web::Data<UserState<U, C>>, auth: AuthContext) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ProfileCache + 'static,
{
    match state.user_service.get_profile(auth.user_id, &auth.email).await {
        Ok(profile) => HttpResponse::Ok().json(JsonResult::success(profile, "profile")),
        Err(error) => handle_domain_error(&error),
    }
}

/// Handler for PUT /users/profile
///
/// Body `{username?, email?}`. Supplying neither is a 400; a new email
/// already used by another account is a 409. When nothing actually
/// changes the answer is still 200, with `msg_detail` "no changes".
pub async fn update_profile<U, C>(
    state: web::Data<UserState<U, C>>,
    auth: AuthContext,
    request: web::Json<UpdateProfileRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    C: ProfileCache + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    match state
        .user_service
        .update_profile(auth.user_id, request.into_inner().into())
        .await
    {
        Ok(update) => {
            let detail = if update.changed { "profile updated" } else { "no changes" };
            HttpResponse::Ok().json(JsonResult::success(update.profile, detail))
        }
        Err(error) => handle_domain_error(&error),
    }
}
