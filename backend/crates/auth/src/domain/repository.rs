//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use chrono::{DateTime, Utc};
use kernel::id::{DeviceId, UserId};
use platform::client::DeviceDescriptor;

use crate::domain::entity::{device::Device, refresh_token::RefreshToken, user::User};
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Find user by exact email
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    /// Check if email exists
    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Create a new user. A duplicate email yields `AuthError::EmailTaken`.
    async fn create(&self, user: &User) -> AuthResult<()>;
}

/// Devices and refresh tokens
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    type Tx: CredentialTx + Send;

    /// Open a unit of work for refresh rotation
    async fn begin(&self) -> AuthResult<Self::Tx>;

    /// Find the device matching the full descriptor tuple
    async fn find_device(
        &self,
        user_id: &UserId,
        descriptor: &DeviceDescriptor,
    ) -> AuthResult<Option<Device>>;

    /// The non-revoked token for a (user, device), if any
    async fn find_active_refresh(
        &self,
        user_id: &UserId,
        device_id: &DeviceId,
    ) -> AuthResult<Option<RefreshToken>>;

    /// Revoke every non-revoked token for a (user, device); returns the count
    async fn revoke_refresh(
        &self,
        user_id: &UserId,
        device_id: &DeviceId,
        now: DateTime<Utc>,
    ) -> AuthResult<u64>;
}

/// Operations inside one database transaction. Dropping without `commit`
/// discards every write.
#[trait_variant::make(CredentialTx: Send)]
pub trait LocalCredentialTx {
    async fn find_device(
        &mut self,
        user_id: &UserId,
        descriptor: &DeviceDescriptor,
    ) -> AuthResult<Option<Device>>;

    async fn create_device(&mut self, device: &Device) -> AuthResult<()>;

    async fn revoke_refresh(
        &mut self,
        user_id: &UserId,
        device_id: &DeviceId,
        now: DateTime<Utc>,
    ) -> AuthResult<u64>;

    async fn create_refresh(&mut self, token: &RefreshToken) -> AuthResult<()>;

    async fn commit(self) -> AuthResult<()>;

    async fn rollback(self) -> AuthResult<()>;
}
