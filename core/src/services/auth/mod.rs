//! Authentication service module
//!
//! Registration, password login, token refresh and logout. Login and
//! refresh both return a fresh access/refresh pair; logout blacklists
//! whatever lifetime the presented tokens have left.

mod password;
mod service;

#[cfg(test)]
mod tests;

pub use password::PasswordHasher;
pub use service::{AuthService, LogoutReport, NewAccount};
