//! Liveness and dependency health endpoints shared by the services

use actix_web::HttpResponse;
use std::collections::HashMap;
use std::time::{Duration, Instant};

use ms_core::repositories::RevocationStore;
use ms_shared::error_codes;
use ms_shared::types::{HealthResponse, HealthStatus, ServiceHealth};
use ms_shared::JsonResult;

/// Upper bound for one dependency probe
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

/// Ping the revocation store and time the round trip
pub async fn probe_revocation_store(store: &dyn RevocationStore) -> ServiceHealth {
    let started = Instant::now();
    match tokio::time::timeout(PROBE_TIMEOUT, store.ping()).await {
        Ok(Ok(())) => ServiceHealth::healthy(started.elapsed().as_millis() as u64),
        Ok(Err(e)) => ServiceHealth::unhealthy(e.to_string()),
        Err(_) => ServiceHealth::unhealthy(format!("no answer within {:?}", PROBE_TIMEOUT)),
    }
}

/// 200 unless a dependency is unhealthy, in which case 503
pub fn health_response(service: &str, dependencies: HashMap<String, ServiceHealth>) -> HttpResponse {
    let report = HealthResponse::new(service, dependencies);

    if report.status == HealthStatus::Unhealthy {
        log::warn!("{} health check failed: {:?}", service, report.dependencies);
        return HttpResponse::ServiceUnavailable().json(JsonResult::error_with_data(
            error_codes::SERVICE_UNAVAILABLE,
            "unhealthy",
            report,
        ));
    }

    HttpResponse::Ok().json(JsonResult::success(report, "healthy"))
}

/// Health report for a service whose only shared dependency is Redis
pub async fn revocation_store_health(service: &str, store: &dyn RevocationStore) -> HttpResponse {
    let mut dependencies = HashMap::new();
    dependencies.insert("redis".to_string(), probe_revocation_store(store).await);
    health_response(service, dependencies)
}

/// Liveness only; touches no dependency
pub async fn ping() -> HttpResponse {
    HttpResponse::Ok().json(JsonResult::success("pong", "alive"))
}

/// Fallback for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(JsonResult::failure(
        error_codes::NOT_FOUND,
        "the requested resource was not found",
    ))
}
