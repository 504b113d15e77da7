//! Logout Use Case
//!
//! Revokes the refresh token of the calling device only. Other devices
//! of the same user stay logged in.

use std::sync::Arc;

use chrono::Utc;
use kernel::id::UserId;
use kernel::context::RequestContext;
use platform::client::resolve_device_descriptor;

use crate::domain::repository::CredentialStore;
use crate::error::{AuthError, AuthResult};

/// Logout input
pub struct LogoutInput {
    pub device_info: Option<String>,
    pub user_agent: Option<String>,
}

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the number of revoked tokens (0 when the device is unknown
    /// or already logged out)
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
        input: LogoutInput,
    ) -> AuthResult<u64> {
        let descriptor =
            resolve_device_descriptor(input.device_info.as_deref(), input.user_agent.as_deref())
                .map_err(|_| AuthError::InvalidDeviceInfo)?;

        let Some(device) = self.store.find_device(user_id, &descriptor).await? else {
            tracing::debug!(request_id = %ctx.request_id, user_id = %user_id, "Logout from unknown device");
            return Ok(0);
        };

        let revoked = self
            .store
            .revoke_refresh(user_id, &device.device_id, Utc::now())
            .await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user_id,
            device_id = %device.device_id,
            revoked,
            "User logged out"
        );

        Ok(revoked)
    }
}
