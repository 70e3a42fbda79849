//! Configuration for the token service

use ms_shared::config::JwtConfig;

/// Configuration for the token service
#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    /// HS256 signing secret shared by every service
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub access_token_expiry_secs: i64,
    /// Refresh token lifetime in seconds
    pub refresh_token_expiry_secs: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        JwtConfig::default().into()
    }
}

impl From<JwtConfig> for TokenServiceConfig {
    fn from(config: JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret,
            access_token_expiry_secs: config.access_token_expiry,
            refresh_token_expiry_secs: config.refresh_token_expiry,
        }
    }
}

impl TokenServiceConfig {
    /// Create a configuration with explicit lifetimes
    pub fn new(secret: impl Into<String>, access_secs: i64, refresh_secs: i64) -> Self {
        Self {
            jwt_secret: secret.into(),
            access_token_expiry_secs: access_secs,
            refresh_token_expiry_secs: refresh_secs,
        }
    }
}
