//! Response envelope and health check payloads

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::errors::{default_message, error_codes};

/// Envelope returned by every endpoint, success or failure
///
/// ```json
/// { "status_code": "0000", "msg": "Success", "msg_detail": "login ok", "data": {...} }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonResult<T> {
    /// Machine-readable code, see [`error_codes`]
    pub status_code: String,

    /// Short message matching the code
    pub msg: String,

    /// Human-readable detail
    pub msg_detail: String,

    /// Payload; `null` on most errors
    pub data: Option<T>,
}

impl<T> JsonResult<T> {
    /// Successful response carrying `data`
    pub fn success(data: T, detail: impl Into<String>) -> Self {
        Self {
            status_code: error_codes::SUCCESS.to_string(),
            msg: default_message(error_codes::SUCCESS).to_string(),
            msg_detail: detail.into(),
            data: Some(data),
        }
    }

    /// Error response with the default message for `code`
    pub fn error(code: &str, detail: impl Into<String>) -> Self {
        Self {
            status_code: code.to_string(),
            msg: default_message(code).to_string(),
            msg_detail: detail.into(),
            data: None,
        }
    }

    /// Error response that still carries a payload (field errors, failure reason)
    pub fn error_with_data(code: &str, detail: impl Into<String>, data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::error(code, detail)
        }
    }

    /// Check if the response is successful
    pub fn is_success(&self) -> bool {
        self.status_code == error_codes::SUCCESS
    }
}

impl JsonResult<()> {
    /// Error response without a payload
    pub fn failure(code: &str, detail: impl Into<String>) -> Self {
        Self::error(code, detail)
    }
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall health status
    pub status: HealthStatus,

    /// Service name
    pub service: String,

    /// Individual dependency checks
    pub dependencies: HashMap<String, ServiceHealth>,

    /// Server timestamp
    pub timestamp: DateTime<Utc>,

    /// Server version
    pub version: String,
}

impl HealthResponse {
    /// Build a report; overall status is the worst dependency status
    pub fn new(service: impl Into<String>, dependencies: HashMap<String, ServiceHealth>) -> Self {
        let status = dependencies
            .values()
            .map(|d| d.status)
            .max()
            .unwrap_or(HealthStatus::Healthy);

        Self {
            status,
            service: service.into(),
            dependencies,
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Health status; ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Health of one dependency
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceHealth {
    /// Dependency status
    pub status: HealthStatus,

    /// Health check message
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Response time in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<u64>,
}

impl ServiceHealth {
    pub fn healthy(response_time_ms: u64) -> Self {
        Self {
            status: HealthStatus::Healthy,
            message: None,
            response_time_ms: Some(response_time_ms),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            message: Some(message.into()),
            response_time_ms: None,
        }
    }
}
