use actix_web::{web, HttpResponse};

use ms_core::repositories::{RevocationStore, UserRepository};
use ms_core::services::PasswordHasher;
use ms_shared::JsonResult;

use super::AuthState;
use crate::dto::auth::{LogoutRequest, LogoutResponse};

/// Handler for POST /auth/logout
///
/// Revokes whatever lifetime the presented tokens have left. Always
/// succeeds: expired, garbled or missing tokens are simply skipped.
pub async fn logout<U, R, H>(
    state: web::Data<AuthState<U, R, H>>,
    request: web::Json<LogoutRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    R: RevocationStore + 'static,
    H: PasswordHasher + 'static,
{
    let report = state
        .auth_service
        .logout(&request.access_token, &request.refresh_token)
        .await;

    log::info!(
        "Logout processed (access revoked: {}, refresh revoked: {})",
        report.access_revoked,
        report.refresh_revoked
    );

    HttpResponse::Ok().json(JsonResult::success(
        LogoutResponse { success: true },
        "logged out",
    ))
}
