//! Shared handler helpers

pub mod error;

pub use error::{
    handle_domain_error, json_error_handler, refresh_error_response, validation_error_response,
};
