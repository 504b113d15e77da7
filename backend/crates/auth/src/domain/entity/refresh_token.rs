//! Refresh Token Entity
//!
//! Persisted record of an issued refresh secret. Only the hash is kept.

use chrono::{DateTime, Duration, Utc};
use kernel::id::{DeviceId, RefreshTokenId, UserId};

use crate::domain::value_object::refresh_secret::RefreshTokenHash;

#[derive(Debug, Clone)]
pub struct RefreshToken {
    pub refresh_id: RefreshTokenId,
    pub user_id: UserId,
    pub device_id: DeviceId,
    pub token_hash: RefreshTokenHash,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    /// Set when rotated out or logged out
    pub revoked_at: Option<DateTime<Utc>>,
}

impl RefreshToken {
    /// New active token expiring `ttl` after `now`
    pub fn issue(
        user_id: UserId,
        device_id: DeviceId,
        token_hash: RefreshTokenHash,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            refresh_id: RefreshTokenId::new(),
            user_id,
            device_id,
            token_hash,
            created_at: now,
            expires_at: now + ttl,
            revoked_at: None,
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// Not revoked and not yet expired
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && now < self.expires_at
    }

    /// No-op when already revoked
    pub fn revoke(&mut self, now: DateTime<Utc>) {
        if self.revoked_at.is_none() {
            self.revoked_at = Some(now);
        }
    }
}
