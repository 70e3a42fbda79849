//! Order entity served by the order service.

use serde::{Deserialize, Serialize};

/// An order; the service currently serves a fixed catalogue item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: u64,
    pub item: String,
    pub amount: f64,
}

impl Order {
    /// Placeholder order returned for any id
    pub fn sample(id: u64) -> Self {
        Self {
            id,
            item: "Gadget".to_string(),
            amount: 99.9,
        }
    }
}
