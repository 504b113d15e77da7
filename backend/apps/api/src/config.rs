//! Environment Configuration
//!
//! Read once at startup. Missing secrets are generated in development and
//! rejected in production.

use anyhow::{Context, bail};
use auth::AuthConfig;
use ledger::{CursorSigner, LedgerConfig};
use platform::crypto::{from_base64, random_bytes};
use platform::password::PasswordHashConfig;

const MIN_ACCESS_SECRET_BYTES: usize = 32;

/// Typed view of the process environment
#[derive(Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub production: bool,
    pub cookie_domain: String,
    /// Raw cursor HMAC key
    pub cursor_secret: Vec<u8>,
    pub access_token_issuer: String,
    pub access_token_secret: Vec<u8>,
    pub max_page_size: i32,
    pub default_page_size: i32,
    pub password_hash: PasswordHashConfig,
    pub port: u16,
    pub frontend_origins: Vec<String>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("production", &self.production)
            .field("cookie_domain", &self.cookie_domain)
            .field("access_token_issuer", &self.access_token_issuer)
            .field("max_page_size", &self.max_page_size)
            .field("default_page_size", &self.default_page_size)
            .field("password_hash", &self.password_hash)
            .field("port", &self.port)
            .field("frontend_origins", &self.frontend_origins)
            .finish_non_exhaustive()
    }
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = var("DATABASE_URL").context("DATABASE_URL must be set")?;
        let production = var("ENV").is_some_and(|v| v.eq_ignore_ascii_case("production"));

        let cursor_secret = match var("ENCODE_CURSOR_SECRET") {
            Some(secret) => {
                // validates base64 and the minimum key length
                CursorSigner::from_base64(&secret).context("invalid ENCODE_CURSOR_SECRET")?;
                from_base64(secret.trim()).context("invalid ENCODE_CURSOR_SECRET")?
            }
            None if production => bail!("ENCODE_CURSOR_SECRET must be set in production"),
            None => random_bytes(32)?,
        };

        let access_token_secret = match var("ACCESS_TOKEN_SECRET") {
            Some(secret) if secret.len() < MIN_ACCESS_SECRET_BYTES => {
                bail!("ACCESS_TOKEN_SECRET must be at least {MIN_ACCESS_SECRET_BYTES} bytes")
            }
            Some(secret) => secret.into_bytes(),
            None if production => bail!("ACCESS_TOKEN_SECRET must be set in production"),
            None => random_bytes(MIN_ACCESS_SECRET_BYTES)?,
        };

        let defaults = PasswordHashConfig::default();
        let password_hash = PasswordHashConfig {
            memory_kib: parse_or(&var, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parse_or(&var, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            ..defaults
        };

        let max_page_size = parse_or(&var, "MAX_PAGE_SIZE", 100)?;
        let default_page_size = parse_or(&var, "DEFAULT_PAGE_SIZE", 20)?;
        if max_page_size <= 0 || default_page_size <= 0 {
            bail!("page sizes must be positive");
        }

        Ok(Self {
            database_url,
            production,
            cookie_domain: var("COOKIE_DOMAIN").unwrap_or_else(|| "localhost".to_string()),
            cursor_secret,
            access_token_issuer: var("ACCESS_TOKEN_ISSUER")
                .unwrap_or_else(|| "finance-api".to_string()),
            access_token_secret,
            max_page_size,
            default_page_size: default_page_size.min(max_page_size),
            password_hash,
            port: parse_or(&var, "APP_PORT", 8080)?,
            frontend_origins: var("FRONTEND_ORIGINS")
                .unwrap_or_else(|| "http://localhost:5173".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            access_token_issuer: self.access_token_issuer.clone(),
            access_token_secret: self.access_token_secret.clone(),
            cookie_secure: self.production,
            cookie_domain: Some(self.cookie_domain.clone()),
            ..AuthConfig::default()
        }
    }

    pub fn ledger_config(&self) -> LedgerConfig {
        LedgerConfig {
            max_page_size: self.max_page_size,
            default_page_size: self.default_page_size,
            cursor_secret: self.cursor_secret.clone(),
        }
    }
}

fn parse_or<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("invalid {key}: {raw}")),
        None => Ok(default),
    }
}
