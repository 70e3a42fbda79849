//! Revocation service: the policy layer over a [`RevocationStore`]
//!
//! [`RevocationStore`]: crate::repositories::RevocationStore

mod service;


pub use service::RevocationService;
