//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::{CryptoError, random_bytes};
use platform::token::{ACCESS_TOKEN_TTL, TokenMinter};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Refresh cookie name
    pub refresh_cookie_name: String,
    /// `iss` claim of access tokens
    pub access_token_issuer: String,
    /// HMAC key for access tokens
    pub access_token_secret: Vec<u8>,
    /// Access token lifetime (15 minutes)
    pub access_token_ttl: Duration,
    /// Refresh record lifetime in the store (60 days)
    pub refresh_token_ttl: Duration,
    /// Refresh cookie lifetime on the wire (7 days)
    pub refresh_cookie_max_age: Duration,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Cookie `Domain` attribute
    pub cookie_domain: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            refresh_cookie_name: "refresh_token".to_string(),
            access_token_issuer: "finance-api".to_string(),
            access_token_secret: Vec::new(),
            access_token_ttl: ACCESS_TOKEN_TTL,
            refresh_token_ttl: Duration::from_secs(60 * 24 * 3600), // 60 days
            refresh_cookie_max_age: Duration::from_secs(7 * 24 * 3600), // 1 week
            cookie_secure: true,
            cookie_same_site: SameSite::Strict,
            cookie_domain: Some("localhost".to_string()),
        }
    }
}

impl AuthConfig {
    /// Create config with a random access-token secret (for development)
    pub fn with_random_secret() -> Result<Self, CryptoError> {
        Ok(Self {
            access_token_secret: random_bytes(32)?,
            ..Default::default()
        })
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Result<Self, CryptoError> {
        Ok(Self {
            cookie_secure: false,
            ..Self::with_random_secret()?
        })
    }

    /// Refresh record lifetime as a chrono duration
    pub fn refresh_token_ttl(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.refresh_token_ttl.as_secs() as i64)
    }

    /// Minter for this issuer and secret
    pub fn token_minter(&self) -> TokenMinter {
        TokenMinter::new(self.access_token_issuer.clone(), &self.access_token_secret)
    }

    /// Cookie carrying the refresh secret
    pub fn refresh_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.refresh_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            domain: self.cookie_domain.clone(),
            max_age_secs: Some(self.refresh_cookie_max_age.as_secs() as i64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_cookie_attributes() {
        let cookie = AuthConfig::default().refresh_cookie().build_set_cookie("abc");
        assert!(cookie.starts_with("refresh_token=abc"));
        assert!(cookie.contains("Path=/"));
        assert!(cookie.contains("Domain=localhost"));
        assert!(cookie.contains("Max-Age=604800"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Secure"));
        assert!(cookie.contains("SameSite=Strict"));
    }

    #[test]
    fn test_development_cookie_not_secure() {
        let config = AuthConfig::development().unwrap();
        assert!(!config.refresh_cookie().build_set_cookie("abc").contains("Secure"));
        assert_eq!(config.access_token_secret.len(), 32);
    }

    #[test]
    fn test_refresh_ttl_sixty_days() {
        assert_eq!(AuthConfig::default().refresh_token_ttl(), chrono::Duration::days(60));
    }
}
