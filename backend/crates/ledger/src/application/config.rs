//! Application Configuration
//!
//! Configuration for the ledger application layer.

use platform::crypto::{CryptoError, random_bytes};

use crate::domain::services::{CursorError, CursorSigner, MIN_CURSOR_KEY_BYTES};

/// Ledger application configuration
#[derive(Clone)]
pub struct LedgerConfig {
    /// Upper bound for a list page; larger requests are clamped
    pub max_page_size: i32,
    /// Page size when the client sends no `limit`
    pub default_page_size: i32,
    /// Raw HMAC key for cursor tokens
    pub cursor_secret: Vec<u8>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            max_page_size: 100,
            default_page_size: 20,
            cursor_secret: Vec::new(),
        }
    }
}

impl std::fmt::Debug for LedgerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerConfig")
            .field("max_page_size", &self.max_page_size)
            .field("default_page_size", &self.default_page_size)
            .field("cursor_secret", &"[REDACTED]")
            .finish()
    }
}

impl LedgerConfig {
    /// Create config with a random cursor secret (for development)
    pub fn with_random_secret() -> Result<Self, CryptoError> {
        Ok(Self {
            cursor_secret: random_bytes(MIN_CURSOR_KEY_BYTES)?,
            ..Default::default()
        })
    }

    /// Create config for development
    pub fn development() -> Result<Self, CryptoError> {
        Self::with_random_secret()
    }

    /// Signer over `cursor_secret`; fails when the key is missing or short
    pub fn cursor_signer(&self) -> Result<CursorSigner, CursorError> {
        CursorSigner::new(self.cursor_secret.clone())
    }
}
