//! # Session core
//!
//! Domain layer for the auth, user and order services: token claims and
//! issuance, the revocation list and its failure policy, the auth gate,
//! and the account/profile/order use cases. Storage and transport are
//! abstracted behind traits implemented in the infrastructure crate.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{AccessClaims, Order, RefreshClaims, Role, TokenKind, TokenPair, User};
pub use domain::value_objects::{AuthResponse, UserProfile};
pub use errors::{AuthError, DomainError, DomainResult, TokenError};
pub use repositories::{RevocationStore, UserRepository};
pub use services::{AccessGate, AuthGate, AuthService, OrderService, RevocationService, TokenService, UserService};
