//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{AccessClaims, Order, RefreshClaims, Role, TokenKind, TokenPair, User};
pub use value_objects::{AuthResponse, UserProfile};
