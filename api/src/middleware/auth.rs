//! JWT authentication middleware for protecting API endpoints.
//!
//! Every request under a wrapped scope passes through the [`AccessGate`]:
//! bearer format, then the revocation list, then signature and expiry,
//! then token kind. Rejected requests are answered here with the JSON
//! envelope and never reach the handler.

use actix_web::{
    body::{BoxBody, EitherBody},
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ms_core::domain::entities::{AccessClaims, Role};
use ms_core::errors::{DomainError, TokenError};
use ms_core::services::{AccessGate, GateRejection};

use crate::handlers::error::handle_domain_error;

/// Identity of an admitted caller, injected into request extensions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: u64,
    pub email: String,
    pub role: Role,
}

impl From<AccessClaims> for AuthContext {
    fn from(claims: AccessClaims) -> Self {
        Self {
            user_id: claims.user_id,
            email: claims.email,
            role: claims.role,
        }
    }
}

/// JWT authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    gate: Arc<dyn AccessGate>,
}

impl JwtAuth {
    pub fn new(gate: Arc<dyn AccessGate>) -> Self {
        Self { gate }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            gate: Arc::clone(&self.gate),
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    gate: Arc<dyn AccessGate>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B, BoxBody>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let gate = Arc::clone(&self.gate);

        Box::pin(async move {
            let header = req
                .headers()
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned);

            match gate.admit(header.as_deref()).await {
                Ok(claims) => {
                    req.extensions_mut().insert(AuthContext::from(claims));
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(rejection) => {
                    log_rejection(&req, &rejection);
                    let response = handle_domain_error(&rejection.error);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

fn log_rejection(req: &ServiceRequest, rejection: &GateRejection) {
    match &rejection.error {
        DomainError::Unavailable { .. } => log::warn!(
            "{} {} rejected at {} stage: {}",
            req.method(),
            req.path(),
            rejection.stage,
            rejection.error
        ),
        _ => log::debug!(
            "{} {} rejected at {} stage: {}",
            req.method(),
            req.path(),
            rejection.stage,
            rejection.error
        ),
    }
}

/// Extractor for required authentication
///
/// Fails with 401 when the route is not behind [`JwtAuth`].
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req.extensions().get::<AuthContext>().cloned().ok_or_else(|| {
            let response = handle_domain_error(&DomainError::Token(TokenError::Missing));
            actix_web::error::InternalError::from_response("authentication required", response)
                .into()
        });

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}
