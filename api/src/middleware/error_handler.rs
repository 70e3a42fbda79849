//! Last-resort handling of panics raised while serving a request
//!
//! A panicking handler would otherwise drop the connection without a
//! response. The guard turns it into the usual 500 envelope.

use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    Error, HttpResponse,
};
use futures_util::future::{FutureExt, LocalBoxFuture};
use std::future::{ready, Ready};
use std::panic::AssertUnwindSafe;
use std::rc::Rc;

use ms_shared::error_codes;
use ms_shared::JsonResult;

/// Middleware converting handler panics into 500 responses
#[derive(Debug, Clone, Copy, Default)]
pub struct PanicGuard;

impl<S, B> Transform<S, ServiceRequest> for PanicGuard
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = PanicGuardMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(PanicGuardMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct PanicGuardMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for PanicGuardMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        // The router needs sole ownership of the request, so keep only what the log line uses
        let method = req.method().clone();
        let path = req.path().to_string();

        Box::pin(async move {
            let outcome = AssertUnwindSafe(async move { service.call(req).await })
                .catch_unwind()
                .await;

            match outcome {
                Ok(result) => result,
                Err(panic) => {
                    let reason = panic
                        .downcast_ref::<&str>()
                        .map(|s| s.to_string())
                        .or_else(|| panic.downcast_ref::<String>().cloned())
                        .unwrap_or_else(|| "unknown panic".to_string());
                    log::error!("Handler panicked on {} {}: {}", method, path, reason);

                    let response = HttpResponse::InternalServerError().json(JsonResult::failure(
                        error_codes::INTERNAL_ERROR,
                        "internal server error",
                    ));
                    Err(InternalError::from_response("panic", response).into())
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{body::to_bytes, http::StatusCode, test, web, App, HttpRequest};

    async fn explode() -> HttpResponse {
        panic!("handler exploded")
    }

    async fn echo_id(req: HttpRequest) -> HttpResponse {
        let id = req.match_info().get("id").unwrap_or_default().to_string();
        HttpResponse::Ok().body(id)
    }

    #[actix_web::test]
    async fn test_panic_becomes_500_envelope() {
        let app = test::init_service(
            App::new()
                .wrap(PanicGuard)
                .route("/boom", web::get().to(explode))
                .route("/fine", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let err = match test::try_call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await {
            Ok(resp) => panic!("expected an error, got {}", resp.status()),
            Err(err) => err,
        };
        let resp = err.error_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = to_bytes(resp.into_body()).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status_code"], "5000");

        // the worker keeps serving afterwards
        let resp = test::call_service(&app, test::TestRequest::get().uri("/fine").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_routed_requests_pass_through() {
        let app = test::init_service(
            App::new()
                .wrap(PanicGuard)
                .route("/items/{id}", web::get().to(echo_id)),
        )
        .await;

        let resp = test::call_service(&app, test::TestRequest::get().uri("/items/42").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(test::read_body(resp).await, "42");
    }
}
