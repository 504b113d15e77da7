//! Access Tokens and Refresh Secrets
//!
//! Access tokens are HS256 JWTs carrying `iss`, `iat`, `nbf`, `exp` and
//! `sub` (the user UUID). Refresh secrets are 32 random bytes, hex encoded;
//! only their SHA-256 is ever stored.

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::crypto::random_hex;

/// Default access token lifetime
pub const ACCESS_TOKEN_TTL: Duration = Duration::from_secs(15 * 60);

/// Raw bytes in a refresh secret
pub const REFRESH_SECRET_BYTES: usize = 32;

/// Allowed clock skew when validating time claims
const LEEWAY_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("signing key is empty")]
    EmptyKey,

    #[error("token ttl must be positive")]
    NonPositiveTtl,

    #[error("token encoding failed: {0}")]
    Encoding(jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    Invalid(jsonwebtoken::errors::Error),

    #[error("token subject is not a UUID")]
    InvalidSubject,

    #[error("random source failed: {0}")]
    Random(#[from] crate::crypto::CryptoError),
}

/// Access token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    pub iss: String,
    pub sub: String,
    pub iat: i64,
    pub nbf: i64,
    pub exp: i64,
}

impl AccessClaims {
    /// Subject parsed as a user UUID
    pub fn subject(&self) -> Result<Uuid, TokenError> {
        Uuid::parse_str(&self.sub).map_err(|_| TokenError::InvalidSubject)
    }
}

/// Mints and validates access tokens; mints refresh secrets
#[derive(Clone)]
pub struct TokenMinter {
    issuer: String,
    encoding: EncodingKey,
    decoding: DecodingKey,
    has_key: bool,
}

impl TokenMinter {
    pub fn new(issuer: impl Into<String>, secret: &[u8]) -> Self {
        Self {
            issuer: issuer.into(),
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            has_key: !secret.is_empty(),
        }
    }

    pub fn mint_access(&self, subject: Uuid, ttl: Duration) -> Result<String, TokenError> {
        if !self.has_key {
            return Err(TokenError::EmptyKey);
        }
        if ttl.is_zero() {
            return Err(TokenError::NonPositiveTtl);
        }

        let now = Utc::now().timestamp();
        let claims = AccessClaims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            iat: now,
            nbf: now,
            exp: now + ttl.as_secs().max(1) as i64,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(TokenError::Encoding)
    }

    /// Accepts only the HMAC-SHA family, the configured issuer, unexpired
    /// and already-valid tokens, and UUID subjects.
    pub fn validate_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        if !self.has_key {
            return Err(TokenError::EmptyKey);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = LEEWAY_SECS;

        let data =
            decode::<AccessClaims>(token, &self.decoding, &validation).map_err(TokenError::Invalid)?;
        data.claims.subject()?;

        Ok(data.claims)
    }

    /// Fresh refresh secret (64 hex chars)
    pub fn mint_refresh(&self) -> Result<String, TokenError> {
        Ok(random_hex(REFRESH_SECRET_BYTES)?)
    }
}
