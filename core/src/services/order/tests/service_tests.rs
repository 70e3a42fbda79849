//! Unit tests for the order service

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::Arc;

use crate::domain::entities::user::Role;
use crate::domain::value_objects::UserProfile;
use crate::errors::{DomainError, DomainResult, TokenError};
use crate::services::order::{OrderService, UserProfileClient};

/// Client returning a canned answer and recording forwarded headers
struct StubClient {
    answer: DomainResult<UserProfile>,
    seen: Mutex<Vec<String>>,
}

impl StubClient {
    fn new(answer: DomainResult<UserProfile>) -> Self {
        Self {
            answer,
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl UserProfileClient for StubClient {
    async fn fetch_profile(&self, authorization: &str) -> DomainResult<UserProfile> {
        self.seen.lock().unwrap().push(authorization.to_string());
        self.answer.clone()
    }
}

fn profile() -> UserProfile {
    UserProfile {
        id: 1,
        email: "a@x.com".to_string(),
        username: "alice01".to_string(),
        role: Role::User,
    }
}

#[tokio::test]
async fn test_order_carries_caller_profile() {
    let client = Arc::new(StubClient::new(Ok(profile())));
    let service = OrderService::new(client.clone());

    let details = service.get_order(42, "Bearer tok").await.unwrap();

    assert_eq!(details.order.id, 42);
    assert_eq!(details.order.item, "Gadget");
    assert_eq!(details.user, profile());
    assert_eq!(client.seen.lock().unwrap().as_slice(), ["Bearer tok".to_string()]);
}

#[tokio::test]
async fn test_upstream_errors_propagate() {
    let unavailable = OrderService::new(Arc::new(StubClient::new(Err(
        DomainError::unavailable("user service down"),
    ))));
    assert!(matches!(
        unavailable.get_order(1, "Bearer tok").await,
        Err(DomainError::Unavailable { .. })
    ));

    let rejected = OrderService::new(Arc::new(StubClient::new(Err(TokenError::Revoked.into()))));
    assert!(matches!(
        rejected.get_order(1, "Bearer tok").await,
        Err(DomainError::Token(TokenError::Revoked))
    ));
}

#[test]
fn test_order_details_shape() {
    let details = crate::services::order::OrderDetails {
        order: crate::domain::entities::Order::sample(7),
        user: profile(),
    };
    let json = serde_json::to_value(&details).unwrap();

    assert_eq!(json["order"]["id"], 7);
    assert_eq!(json["order"]["amount"], 99.9);
    assert_eq!(json["user"]["role"], "User");
}
