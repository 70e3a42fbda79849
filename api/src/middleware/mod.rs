pub mod auth;
pub mod cors;
pub mod error_handler;

pub use auth::{AuthContext, JwtAuth, OptionalAuth};
pub use cors::create_cors;
pub use error_handler::PanicGuard;
