//! Main token service implementation

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::time::Duration;
use tracing::{debug, error};

use crate::domain::entities::token::{
    AccessClaims, RawClaims, RefreshClaims, TokenKind, TokenPair, VerifiedClaims,
};
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Issues and verifies HS256 access/refresh tokens
///
/// Verification is pure and synchronous; the service holds no mutable state
/// and is shared behind an `Arc` by every request.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Errors
    ///
    /// `DomainError::Configuration` when the secret is empty, a lifetime is not
    /// positive, or the access lifetime exceeds the refresh lifetime.
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.is_empty() {
            return Err(DomainError::Configuration {
                message: "JWT secret must not be empty".to_string(),
            });
        }
        if config.access_token_expiry_secs <= 0 || config.refresh_token_expiry_secs <= 0 {
            return Err(DomainError::Configuration {
                message: "token lifetimes must be positive".to_string(),
            });
        }
        if config.access_token_expiry_secs > config.refresh_token_expiry_secs {
            return Err(DomainError::Configuration {
                message: format!(
                    "access token lifetime ({}s) exceeds refresh token lifetime ({}s)",
                    config.access_token_expiry_secs, config.refresh_token_expiry_secs
                ),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Access token lifetime in seconds
    pub fn access_ttl_secs(&self) -> i64 {
        self.config.access_token_expiry_secs
    }

    /// Refresh token lifetime in seconds
    pub fn refresh_ttl_secs(&self) -> i64 {
        self.config.refresh_token_expiry_secs
    }

    /// Generates a new access + refresh pair for an account
    ///
    /// # Errors
    ///
    /// `TokenError::SigningFailed` if either token cannot be signed.
    pub fn issue_pair(&self, email: &str, user_id: u64, role: Role) -> Result<TokenPair, DomainError> {
        let access = AccessClaims::new(email, user_id, role, self.config.access_token_expiry_secs);
        let refresh = RefreshClaims::new(email, self.config.refresh_token_expiry_secs);

        Ok(TokenPair {
            access_token: self.encode_jwt(&RawClaims::from(&access))?,
            refresh_token: self.encode_jwt(&RawClaims::from(&refresh))?,
            access_expires_at: access.expires_at,
            refresh_expires_at: refresh.expires_at,
        })
    }

    /// Encodes claims into a JWT
    pub(crate) fn encode_jwt(&self, claims: &RawClaims) -> Result<String, DomainError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key).map_err(|e| {
            error!("Failed to sign token: {}", e);
            DomainError::Token(TokenError::SigningFailed)
        })
    }

    /// Checks signature, expiry and payload shape, but not the kind
    fn decode_claims(&self, token: &str) -> Result<VerifiedClaims, TokenError> {
        let data = decode::<RawClaims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenError::InvalidSignature
                }
                _ => TokenError::Invalid,
            }
        })?;

        // jsonwebtoken accepts exp == now; a token is already dead at its exp second
        if Utc::now().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }

        VerifiedClaims::try_from(data.claims)
    }

    /// Verifies a token and requires it to be of `required` kind
    ///
    /// # Returns
    ///
    /// * `Ok(VerifiedClaims)` - signature, expiry and kind all check out
    /// * `Err(TokenError::InvalidSignature)` - wrong key or signing method
    /// * `Err(TokenError::Expired)` - `now >= exp`
    /// * `Err(TokenError::WrongKind)` - e.g. a refresh token presented as access
    /// * `Err(TokenError::Invalid)` - anything unparseable
    pub fn verify(&self, token: &str, required: TokenKind) -> Result<VerifiedClaims, DomainError> {
        if token.is_empty() {
            return Err(TokenError::Missing.into());
        }

        let claims = self.decode_claims(token).map_err(|e| {
            debug!("Token rejected: {}", e);
            e
        })?;

        if claims.kind() != required {
            debug!("Token rejected: expected {}, got {}", required, claims.kind());
            return Err(TokenError::WrongKind {
                expected: required,
                actual: claims.kind(),
            }
            .into());
        }

        Ok(claims)
    }

    /// Verifies an access token and returns its claims
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, DomainError> {
        match self.verify(token, TokenKind::Access)? {
            VerifiedClaims::Access(claims) => Ok(claims),
            VerifiedClaims::Refresh(_) => Err(TokenError::Invalid.into()),
        }
    }

    /// Verifies a refresh token and returns its claims
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, DomainError> {
        match self.verify(token, TokenKind::Refresh)? {
            VerifiedClaims::Refresh(claims) => Ok(claims),
            VerifiedClaims::Access(_) => Err(TokenError::Invalid.into()),
        }
    }

    /// Time left before `token` expires, ignoring its kind
    ///
    /// `None` when the token is unparseable, forged or already expired.
    pub fn remaining_ttl(&self, token: &str) -> Option<Duration> {
        let claims = self.decode_claims(token).ok()?;
        let remaining = claims.expires_at() - Utc::now().timestamp();
        u64::try_from(remaining)
            .ok()
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
