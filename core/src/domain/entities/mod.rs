//! Domain entities representing core business objects.

pub mod order;
pub mod token;
pub mod user;


// Re-export commonly used types
pub use order::Order;
pub use token::{AccessClaims, RefreshClaims, TokenKind, TokenPair, VerifiedClaims};
pub use user::{Role, User};
