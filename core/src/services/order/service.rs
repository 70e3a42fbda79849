use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::warn;

use crate::domain::entities::order::Order;
use crate::domain::value_objects::UserProfile;
use crate::errors::DomainResult;

/// Fetches the caller's profile from the user service
///
/// Implementations forward the caller's `Authorization` header unchanged.
/// An upstream 401 maps to a token error; any other failure to
/// `DomainError::Unavailable`.
#[async_trait]
pub trait UserProfileClient: Send + Sync {
    async fn fetch_profile(&self, authorization: &str) -> DomainResult<UserProfile>;
}

/// An order together with the account that asked for it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub order: Order,
    pub user: UserProfile,
}

pub struct OrderService<C: UserProfileClient> {
    users: Arc<C>,
}

impl<C: UserProfileClient> OrderService<C> {
    pub fn new(users: Arc<C>) -> Self {
        Self { users }
    }

    /// Look up order `id` on behalf of the bearer of `authorization`
    pub async fn get_order(&self, id: u64, authorization: &str) -> DomainResult<OrderDetails> {
        let user = self.users.fetch_profile(authorization).await.map_err(|e| {
            warn!("Failed to fetch profile for order {}: {}", id, e);
            e
        })?;

        Ok(OrderDetails {
            order: Order::sample(id),
            user,
        })
    }
}
