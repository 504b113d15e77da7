//! Refresh Secret Value Objects
//!
//! `RefreshSecret` is the plaintext handed to the client exactly once
//! (in the cookie). `RefreshTokenHash` is what gets persisted.

use std::fmt;

use platform::crypto::sha256_hex;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Plaintext refresh secret, zeroized on drop, redacted in `Debug`
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct RefreshSecret(String);

impl RefreshSecret {
    pub fn new(secret: String) -> Self {
        Self(secret)
    }

    /// Cookie value
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn hash(&self) -> RefreshTokenHash {
        RefreshTokenHash(sha256_hex(self.0.as_bytes()))
    }
}

impl fmt::Debug for RefreshSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RefreshSecret([REDACTED])")
    }
}

/// Lowercase hex SHA-256 of a refresh secret
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefreshTokenHash(String);

impl RefreshTokenHash {
    pub fn from_db(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
