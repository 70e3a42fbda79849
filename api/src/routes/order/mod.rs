//! Order service routes, all behind the auth gate

use actix_web::{http::header::AUTHORIZATION, web, HttpRequest, HttpResponse};
use std::sync::Arc;

use ms_core::repositories::RevocationStore;
use ms_core::services::{OrderService, UserProfileClient};
use ms_shared::JsonResult;

use crate::handlers::error::handle_domain_error;
use crate::middleware::auth::AuthContext;

pub struct OrderState<C: UserProfileClient> {
    pub order_service: Arc<OrderService<C>>,
    /// Probed by `/health`
    pub revocation_store: Arc<dyn RevocationStore>,
}

impl<C: UserProfileClient> OrderState<C> {
    pub fn new(order_service: Arc<OrderService<C>>, revocation_store: Arc<dyn RevocationStore>) -> Self {
        Self {
            order_service,
            revocation_store,
        }
    }
}

/// Handler for GET /orders/{id}
///
/// The caller's `Authorization` header is forwarded unchanged to the user
/// service to resolve who is asking.
pub async fn get_order<C>(
    state: web::Data<OrderState<C>>,
    auth: AuthContext,
    req: HttpRequest,
    path: web::Path<u64>,
) -> HttpResponse
where
    C: UserProfileClient + 'static,
{
    let order_id = path.into_inner();
    // The gate already required this header
    let authorization = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();

    log::debug!("User {} requested order {}", auth.user_id, order_id);

    match state.order_service.get_order(order_id, authorization).await {
        Ok(details) => HttpResponse::Ok().json(JsonResult::success(details, "order")),
        Err(error) => handle_domain_error(&error),
    }
}
