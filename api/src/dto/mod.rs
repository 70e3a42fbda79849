//! Request and response bodies

pub mod auth;
pub mod user;

pub use auth::{LoginRequest, LogoutRequest, LogoutResponse, RefreshTokenRequest, RegisterRequest};
pub use user::UpdateProfileRequest;
