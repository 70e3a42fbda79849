//! Auth gate: decides whether a request carrying a bearer token is admitted
//!
//! The check order is fixed: header format, revocation list, signature and
//! expiry, then token kind. A revoked token is rejected without any
//! cryptographic work.

mod service;

#[cfg(test)]
mod tests;

pub use service::{extract_bearer_token, AccessGate, AdmissionStage, AuthGate, GateRejection};
