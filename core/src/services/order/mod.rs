//! Order service module: orders enriched with the caller's profile

mod service;

#[cfg(test)]
mod tests;

pub use service::{OrderDetails, OrderService, UserProfileClient};
