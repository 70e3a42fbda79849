//! Token claims for the HS256 access/refresh pair.
//!
//! Tokens are never persisted. The wire payloads are:
//!
//! - access: `{ "email", "userId", "role", "iat", "exp" }` with no `token_type`
//! - refresh: `{ "email", "token_type": "refresh", "iat", "exp" }`
//!
//! Decoding goes through [`RawClaims`], which rejects unknown fields, and then
//! into one of the typed claim structs.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::TokenError;

use super::user::Role;

/// Which endpoint family a token is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Access,
    Refresh,
}

impl TokenKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Access => "access",
            TokenKind::Refresh => "refresh",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Claims of a verified access token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessClaims {
    /// Account email
    pub email: String,

    /// Account id in the user store
    pub user_id: u64,

    /// Role at the time the token was issued
    pub role: Role,

    /// Issued at timestamp (0 when the token carried none)
    pub issued_at: i64,

    /// Expiration timestamp
    pub expires_at: i64,
}

impl AccessClaims {
    /// Creates claims for a new access token valid for `ttl_secs`
    pub fn new(email: impl Into<String>, user_id: u64, role: Role, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            email: email.into(),
            user_id,
            role,
            issued_at: now,
            expires_at: now + ttl_secs,
        }
    }
}

/// Claims of a verified refresh token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshClaims {
    /// Account email, used to re-resolve the user on refresh
    pub email: String,

    /// Issued at timestamp (0 when the token carried none)
    pub issued_at: i64,

    /// Expiration timestamp
    pub expires_at: i64,
}

impl RefreshClaims {
    /// Creates claims for a new refresh token valid for `ttl_secs`
    pub fn new(email: impl Into<String>, ttl_secs: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            email: email.into(),
            issued_at: now,
            expires_at: now + ttl_secs,
        }
    }
}

/// Claims of a token whose signature and expiry have been checked
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifiedClaims {
    Access(AccessClaims),
    Refresh(RefreshClaims),
}

impl VerifiedClaims {
    pub fn kind(&self) -> TokenKind {
        match self {
            VerifiedClaims::Access(_) => TokenKind::Access,
            VerifiedClaims::Refresh(_) => TokenKind::Refresh,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            VerifiedClaims::Access(c) => &c.email,
            VerifiedClaims::Refresh(c) => &c.email,
        }
    }

    pub fn expires_at(&self) -> i64 {
        match self {
            VerifiedClaims::Access(c) => c.expires_at,
            VerifiedClaims::Refresh(c) => c.expires_at,
        }
    }
}

/// JSON payload exactly as it travels inside the JWT
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawClaims {
    pub email: String,

    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// Absent on access tokens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<TokenKind>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    pub exp: i64,
}

impl From<&AccessClaims> for RawClaims {
    fn from(claims: &AccessClaims) -> Self {
        Self {
            email: claims.email.clone(),
            user_id: Some(claims.user_id),
            role: Some(claims.role),
            token_type: None,
            iat: Some(claims.issued_at),
            exp: claims.expires_at,
        }
    }
}

impl From<&RefreshClaims> for RawClaims {
    fn from(claims: &RefreshClaims) -> Self {
        Self {
            email: claims.email.clone(),
            user_id: None,
            role: None,
            token_type: Some(TokenKind::Refresh),
            iat: Some(claims.issued_at),
            exp: claims.expires_at,
        }
    }
}

impl TryFrom<RawClaims> for VerifiedClaims {
    type Error = TokenError;

    /// An access payload must carry `userId` and `role`; a refresh payload must not
    fn try_from(raw: RawClaims) -> Result<Self, Self::Error> {
        let issued_at = raw.iat.unwrap_or(0);
        match (raw.token_type.unwrap_or(TokenKind::Access), raw.user_id, raw.role) {
            (TokenKind::Access, Some(user_id), Some(role)) => {
                Ok(VerifiedClaims::Access(AccessClaims {
                    email: raw.email,
                    user_id,
                    role,
                    issued_at,
                    expires_at: raw.exp,
                }))
            }
            (TokenKind::Refresh, None, None) => Ok(VerifiedClaims::Refresh(RefreshClaims {
                email: raw.email,
                issued_at,
                expires_at: raw.exp,
            })),
            _ => Err(TokenError::Invalid),
        }
    }
}

/// Freshly issued access/refresh pair
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Signed access token
    pub access_token: String,

    /// Signed refresh token
    pub refresh_token: String,

    /// Access token expiration timestamp
    pub access_expires_at: i64,

    /// Refresh token expiration timestamp
    pub refresh_expires_at: i64,
}
