//! Platform Crate - Technical Capabilities
//!
//! Shared technical foundations used by the domain crates:
//! - Cryptographic helpers (SHA-256, HMAC-SHA256, Base64, random bytes)
//! - Password hashing (Argon2id)
//! - Access-token minting and validation (HS256 JWT) and refresh secrets
//! - Device descriptor parsing from request headers
//! - Cookie building

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
