//! Authentication response value object for API responses.

use serde::{Deserialize, Serialize};

use crate::domain::entities::token::TokenPair;
use crate::domain::entities::user::User;

use super::user_profile::UserProfile;

/// Returned by login and refresh
///
/// Serializes flat: `{id, email, username, role, access_token, refresh_token}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Account the tokens were issued for
    #[serde(flatten)]
    pub user: UserProfile,

    /// JWT access token for API authentication
    pub access_token: String,

    /// JWT refresh token for obtaining a new pair
    pub refresh_token: String,
}

impl AuthResponse {
    /// Creates an authentication response from a token pair and the account it belongs to
    pub fn from_token_pair(pair: TokenPair, user: &User) -> Self {
        Self {
            user: UserProfile::from(user),
            access_token: pair.access_token,
            refresh_token: pair.refresh_token,
        }
    }
}
