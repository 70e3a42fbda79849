//! HTTP client for the user service
//!
//! The order service does not verify identity details itself: it forwards
//! the caller's `Authorization` header to `GET /users/profile` and trusts
//! the answer.

use async_trait::async_trait;
use reqwest::{header::AUTHORIZATION, Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use ms_core::domain::value_objects::UserProfile;
use ms_core::errors::{DomainError, DomainResult, TokenError};
use ms_core::services::UserProfileClient;
use ms_shared::config::UpstreamConfig;
use ms_shared::JsonResult;

use crate::InfrastructureError;

const PROFILE_PATH: &str = "/users/profile";

#[derive(Clone)]
pub struct HttpUserClient {
    client: Client,
    base_url: String,
}

impl HttpUserClient {
    /// Build a client whose every request is bounded by `timeout`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, InfrastructureError> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &UpstreamConfig) -> Result<Self, InfrastructureError> {
        Self::new(
            config.user_service_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl UserProfileClient for HttpUserClient {
    async fn fetch_profile(&self, authorization: &str) -> DomainResult<UserProfile> {
        let url = format!("{}{}", self.base_url, PROFILE_PATH);
        debug!("Fetching caller profile from {}", url);

        let response = self
            .client
            .get(&url)
            .header(AUTHORIZATION, authorization)
            .send()
            .await
            .map_err(|e| {
                warn!("User service unreachable: {}", e);
                DomainError::from(InfrastructureError::Http(e))
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(TokenError::Invalid.into()),
            StatusCode::NOT_FOUND => {
                return Err(DomainError::NotFound {
                    resource: "user profile".to_string(),
                })
            }
            status => {
                warn!("User service answered {}", status);
                return Err(DomainError::unavailable(format!(
                    "user service answered {}",
                    status
                )));
            }
        }

        let body: JsonResult<UserProfile> = response.json().await.map_err(|e| {
            warn!("Unreadable user service response: {}", e);
            DomainError::from(InfrastructureError::Http(e))
        })?;

        body.data
            .ok_or_else(|| DomainError::unavailable("user service returned no profile"))
    }
}
