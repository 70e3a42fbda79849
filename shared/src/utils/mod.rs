//! Common utility functions

pub mod validation;

pub use validation::{validate_password, validate_role, validate_username, ROLES};
