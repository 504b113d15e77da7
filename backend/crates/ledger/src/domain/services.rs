//! Domain Services
//!
//! Cursor signing for keyset pagination. Wire form is URL-safe base64
//! (no padding) of `JSON(payload) || HMAC-SHA256(key, JSON(payload))`.

use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::TransactionId;
use platform::crypto::{
    HMAC_SHA256_LEN, from_base64, from_base64_url, hmac_sha256, to_base64_url, verify_hmac_sha256,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::value_objects::TransactionDate;

/// Minimum raw key length
pub const MIN_CURSOR_KEY_BYTES: usize = 32;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CursorError {
    #[error("cursor signing key is not set")]
    KeyMissing,

    #[error("cursor signing key must be at least {min} bytes (got {actual})")]
    KeyTooShort { min: usize, actual: usize },

    #[error("cursor signing key is not valid base64")]
    InvalidKey,

    #[error("malformed cursor")]
    InvalidFormat,

    #[error("cursor signature mismatch")]
    BadSignature,
}

/// Position of the last row on a page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub date: NaiveDate,
    pub id: TransactionId,
}

#[derive(Serialize, Deserialize)]
struct CursorPayload {
    date: String,
    id: Uuid,
}

/// Signs and verifies cursors with a process-wide key
#[derive(Clone)]
pub struct CursorSigner {
    key: Arc<[u8]>,
}

impl CursorSigner {
    pub fn new(key: impl Into<Vec<u8>>) -> Result<Self, CursorError> {
        let key = key.into();
        if key.is_empty() {
            return Err(CursorError::KeyMissing);
        }
        if key.len() < MIN_CURSOR_KEY_BYTES {
            return Err(CursorError::KeyTooShort {
                min: MIN_CURSOR_KEY_BYTES,
                actual: key.len(),
            });
        }
        Ok(Self { key: key.into() })
    }

    /// Key given as standard base64
    pub fn from_base64(secret: &str) -> Result<Self, CursorError> {
        if secret.trim().is_empty() {
            return Err(CursorError::KeyMissing);
        }
        let key = from_base64(secret.trim()).map_err(|_| CursorError::InvalidKey)?;
        Self::new(key)
    }

    pub fn encode(&self, cursor: &Cursor) -> Result<String, CursorError> {
        let payload = CursorPayload {
            date: TransactionDate::from(cursor.date).to_string(),
            id: cursor.id.into_uuid(),
        };
        let mut bytes = serde_json::to_vec(&payload).map_err(|_| CursorError::InvalidFormat)?;
        let tag = hmac_sha256(&self.key, &bytes).map_err(|_| CursorError::KeyMissing)?;
        bytes.extend_from_slice(&tag);
        Ok(to_base64_url(&bytes))
    }

    /// `Ok(None)` for an empty token (first page)
    pub fn decode(&self, token: &str) -> Result<Option<Cursor>, CursorError> {
        if token.is_empty() {
            return Ok(None);
        }

        let raw = from_base64_url(token).map_err(|_| CursorError::InvalidFormat)?;
        if raw.len() < HMAC_SHA256_LEN {
            return Err(CursorError::InvalidFormat);
        }
        let (payload, tag) = raw.split_at(raw.len() - HMAC_SHA256_LEN);

        let valid = verify_hmac_sha256(&self.key, payload, tag).map_err(|_| CursorError::KeyMissing)?;
        if !valid {
            return Err(CursorError::BadSignature);
        }

        let payload: CursorPayload =
            serde_json::from_slice(payload).map_err(|_| CursorError::InvalidFormat)?;
        let date = TransactionDate::parse(&payload.date).map_err(|_| CursorError::InvalidFormat)?;

        Ok(Some(Cursor {
            date: date.into_inner(),
            id: TransactionId::from_uuid(payload.id),
        }))
    }
}

impl fmt::Debug for CursorSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CursorSigner([REDACTED])")
    }
}
