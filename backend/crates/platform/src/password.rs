//! Password Hashing and Verification
//!
//! Argon2id with a per-hash random salt embedded in the PHC string.
//! Clear text passwords are normalized (NFKC), zeroized on drop and never
//! printed.

use std::fmt;
use std::sync::Arc;

use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version,
    password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Minimum password length in code points
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password policy violations (sign-up only)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },

    #[error("Password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },

    #[error("Password cannot be empty or contain only whitespace")]
    EmptyOrWhitespace,

    #[error("Password contains invalid control characters")]
    InvalidCharacter,

    #[error("Password is too common or follows a predictable pattern")]
    CommonPattern,
}

#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Invalid hash parameters: {0}")]
    InvalidParams(String),

    /// The secret does not match the stored hash
    #[error("Password mismatch")]
    Mismatch,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password, zeroized on drop, redacted in `Debug`
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize and check against the password policy
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let password = Self::for_verification(raw);
        let normalized = password.0.as_str();

        if normalized.trim().is_empty() {
            return Err(PasswordPolicyError::EmptyOrWhitespace);
        }

        let char_count = normalized.chars().count();
        if char_count < MIN_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooShort {
                min: MIN_PASSWORD_LENGTH,
                actual: char_count,
            });
        }
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        if normalized
            .chars()
            .any(|ch| ch.is_control() && ch != ' ' && ch != '\t')
        {
            return Err(PasswordPolicyError::InvalidCharacter);
        }

        if is_common_pattern(normalized) {
            return Err(PasswordPolicyError::CommonPattern);
        }

        Ok(password)
    }

    /// Normalize only. Used on login, where the policy in force when the
    /// hash was created is irrelevant.
    pub fn for_verification(raw: String) -> Self {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();
        Self(normalized)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format (algorithm, version, params, salt, hash)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Parse a PHC string (e.g. from the database)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Hasher capability
// ============================================================================

/// Argon2 cost parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    /// OWASP recommendation: m=19456 (19 MiB), t=2, p=1
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl PasswordHashConfig {
    /// Smallest parameters Argon2 accepts. Tests only.
    pub fn minimal() -> Self {
        Self {
            memory_kib: 8,
            iterations: 1,
            parallelism: 1,
        }
    }
}

/// Hash a secret; verify a secret against a stored hash
pub trait SecretHasher: Send + Sync {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError>;

    /// `Err(PasswordHashError::Mismatch)` when the password is wrong
    fn verify(
        &self,
        password: &ClearTextPassword,
        stored: &HashedPassword,
    ) -> Result<(), PasswordHashError>;

    /// Hash with the configured cost that matches no real password.
    /// Verified against when the account does not exist.
    fn dummy_hash(&self) -> &HashedPassword;
}

const DUMMY_SECRET: &str = "dummy-password-for-unknown-accounts";

/// Argon2id implementation of [`SecretHasher`]
#[derive(Clone)]
pub struct Argon2Hasher {
    params: Params,
    dummy: HashedPassword,
}

impl Argon2Hasher {
    /// Validates the parameters and precomputes the dummy hash
    pub fn new(config: PasswordHashConfig) -> Result<Self, PasswordHashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordHashError::InvalidParams(e.to_string()))?;

        let dummy = Self::hash_with(&params, DUMMY_SECRET.as_bytes())?;
        Ok(Self { params, dummy })
    }

    fn argon2(params: &Params) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, params.clone())
    }

    fn hash_with(params: &Params, bytes: &[u8]) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        Self::argon2(params)
            .hash_password(bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }
}

impl SecretHasher for Argon2Hasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        Self::hash_with(&self.params, password.as_bytes())
    }

    fn verify(
        &self,
        password: &ClearTextPassword,
        stored: &HashedPassword,
    ) -> Result<(), PasswordHashError> {
        let parsed =
            PasswordHash::new(&stored.hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        // Cost parameters come from the stored hash, not from self.params
        match Self::argon2(&self.params).verify_password(password.as_bytes(), &parsed) {
            Ok(()) => Ok(()),
            Err(argon2::password_hash::Error::Password) => Err(PasswordHashError::Mismatch),
            Err(e) => Err(PasswordHashError::HashingFailed(e.to_string())),
        }
    }

    fn dummy_hash(&self) -> &HashedPassword {
        &self.dummy
    }
}

/// Hash on the blocking pool; Argon2 takes tens of milliseconds
pub async fn hash_blocking(
    hasher: Arc<dyn SecretHasher>,
    password: ClearTextPassword,
) -> Result<HashedPassword, PasswordHashError> {
    tokio::task::spawn_blocking(move || hasher.hash(&password))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
}

/// Verify on the blocking pool
pub async fn verify_blocking(
    hasher: Arc<dyn SecretHasher>,
    password: ClearTextPassword,
    stored: HashedPassword,
) -> Result<(), PasswordHashError> {
    tokio::task::spawn_blocking(move || hasher.verify(&password, &stored))
        .await
        .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?
}

// ============================================================================
// Helper Functions
// ============================================================================

fn is_common_pattern(password: &str) -> bool {
    let lower = password.to_lowercase();

    let mut chars = lower.chars();
    if let Some(first) = chars.next() {
        if chars.all(|c| c == first) {
            return true;
        }
    }

    if is_sequential_numbers(&lower) {
        return true;
    }

    const KEYBOARD_PATTERNS: &[&str] = &["qwerty", "asdfgh", "zxcvbn", "qazwsx", "1qaz2wsx"];
    if KEYBOARD_PATTERNS.iter().any(|p| lower.contains(p)) {
        return true;
    }

    const COMMON_PASSWORDS: &[&str] = &[
        "password",
        "password1",
        "password123",
        "abcdefgh",
        "letmein1",
        "welcome1",
        "admin123",
        "iloveyou",
        "sunshine",
        "princess",
        "football",
        "baseball",
        "trustno1",
    ];
    COMMON_PASSWORDS.contains(&lower.as_str())
}

/// Whole password is digits counting up or down (wrapping 9/0)
fn is_sequential_numbers(s: &str) -> bool {
    if !s.chars().all(|c| c.is_ascii_digit()) || s.len() < 4 {
        return false;
    }
    let digits: Vec<u32> = s.chars().filter_map(|c| c.to_digit(10)).collect();

    let ascending = digits.windows(2).all(|w| w[1] == (w[0] + 1) % 10);
    let descending = digits.windows(2).all(|w| w[0] == (w[1] + 1) % 10);
    ascending || descending
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> Argon2Hasher {
        Argon2Hasher::new(PasswordHashConfig::minimal()).unwrap()
    }

    #[test]
    fn test_password_too_short() {
        let result = ClearTextPassword::new("short".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::TooShort { .. })));
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("aB3!".repeat(40));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_password_whitespace_only() {
        let result = ClearTextPassword::new("        ".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::EmptyOrWhitespace)));
    }

    #[test]
    fn test_password_control_character() {
        let result = ClearTextPassword::new("Valid\u{0007}pass1!".to_string());
        assert!(matches!(result, Err(PasswordPolicyError::InvalidCharacter)));
    }

    #[test]
    fn test_password_common_pattern() {
        for raw in ["password123", "qwertyuiop", "12345678", "98765432", "aaaaaaaaaa"] {
            let result = ClearTextPassword::new(raw.to_string());
            assert!(
                matches!(result, Err(PasswordPolicyError::CommonPattern)),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_valid_password() {
        assert!(ClearTextPassword::new("Validpass1!".to_string()).is_ok());
    }

    #[test]
    fn test_debug_is_redacted() {
        let password = ClearTextPassword::for_verification("Validpass1!".to_string());
        let debug = format!("{:?}", password);
        assert!(!debug.contains("Validpass1!"));
        assert!(debug.contains("REDACTED"));
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = hasher();
        let password = ClearTextPassword::new("Validpass1!".to_string()).unwrap();
        let hashed = hasher.hash(&password).unwrap();

        assert!(hashed.as_phc_string().starts_with("$argon2id$"));
        assert!(hasher.verify(&password, &hashed).is_ok());

        let wrong = ClearTextPassword::for_verification("Invalidpass1!".to_string());
        assert!(matches!(
            hasher.verify(&wrong, &hashed),
            Err(PasswordHashError::Mismatch)
        ));
    }

    #[test]
    fn test_salt_differs_per_hash() {
        let hasher = hasher();
        let password = ClearTextPassword::new("Validpass1!".to_string()).unwrap();
        let a = hasher.hash(&password).unwrap();
        let b = hasher.hash(&password).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_dummy_hash_uses_configured_cost() {
        let hasher = hasher();
        let dummy = hasher.dummy_hash();
        assert!(dummy.as_phc_string().starts_with("$argon2id$v=19$m=8,t=1,p=1$"));

        let password = ClearTextPassword::for_verification("Validpass1!".to_string());
        assert!(matches!(
            hasher.verify(&password, dummy),
            Err(PasswordHashError::Mismatch)
        ));
    }

    #[test]
    fn test_phc_round_trip() {
        let hasher = hasher();
        let password = ClearTextPassword::new("Validpass1!".to_string()).unwrap();
        let hashed = hasher.hash(&password).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(hasher.verify(&password, &restored).is_ok());
        assert!(HashedPassword::from_phc_string("not-a-phc-string").is_err());
    }

    #[test]
    fn test_invalid_params_rejected() {
        let config = PasswordHashConfig {
            memory_kib: 1,
            ..PasswordHashConfig::minimal()
        };
        assert!(matches!(
            Argon2Hasher::new(config),
            Err(PasswordHashError::InvalidParams(_))
        ));
    }

    #[tokio::test]
    async fn test_blocking_helpers() {
        let hasher: Arc<dyn SecretHasher> = Arc::new(hasher());
        let hashed = hash_blocking(
            hasher.clone(),
            ClearTextPassword::new("Validpass1!".to_string()).unwrap(),
        )
        .await
        .unwrap();

        let ok = verify_blocking(
            hasher.clone(),
            ClearTextPassword::for_verification("Validpass1!".to_string()),
            hashed.clone(),
        )
        .await;
        assert!(ok.is_ok());

        let bad = verify_blocking(
            hasher,
            ClearTextPassword::for_verification("nope".to_string()),
            hashed,
        )
        .await;
        assert!(matches!(bad, Err(PasswordHashError::Mismatch)));
    }
}
