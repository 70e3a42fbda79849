pub mod revocation;
pub mod user;

pub use revocation::{revocation_key, InMemoryRevocationStore, RevocationStore};
pub use user::{InMemoryUserRepository, UserRepository};
