//! Business services containing domain logic and use cases.

pub mod auth;
pub mod gate;
pub mod order;
pub mod revocation;
pub mod token;
pub mod user;

// Re-export commonly used types
pub use auth::{AuthService, LogoutReport, NewAccount, PasswordHasher};
pub use gate::{extract_bearer_token, AccessGate, AdmissionStage, AuthGate, GateRejection};
pub use order::{OrderDetails, OrderService, UserProfileClient};
pub use revocation::RevocationService;
pub use token::{TokenService, TokenServiceConfig};
pub use user::{
    profile_cache_key, InMemoryProfileCache, ProfileCache, ProfileChanges, ProfileUpdate,
    UserService, PROFILE_CACHE_TTL,
};
