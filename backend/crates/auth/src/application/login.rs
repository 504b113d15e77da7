//! Login Use Case
//!
//! Verifies credentials, resolves the client device and rotates that
//! device's refresh token. Device resolution, revocation and the new
//! refresh insert share one transaction.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use kernel::context::RequestContext;
use kernel::id::UserId;
use platform::client::{DeviceDescriptor, resolve_device_descriptor};
use platform::password::{ClearTextPassword, PasswordHashError, SecretHasher, verify_blocking};
use platform::token::TokenMinter;

use crate::application::config::AuthConfig;
use crate::domain::entity::{device::Device, refresh_token::RefreshToken};
use crate::domain::repository::{CredentialStore, CredentialTx, UserRepository};
use crate::domain::value_object::email::Email;
use crate::domain::value_object::refresh_secret::{RefreshSecret, RefreshTokenHash};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Raw `X-Device-Info` header
    pub device_info: Option<String>,
    /// Raw `User-Agent` header
    pub user_agent: Option<String>,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user_id: UserId,
    pub access_token: String,
    /// Returned to the client once; only its hash is stored
    pub refresh_secret: RefreshSecret,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository + CredentialStore,
{
    repo: Arc<R>,
    hasher: Arc<dyn SecretHasher>,
    minter: Arc<TokenMinter>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository + CredentialStore,
{
    pub fn new(
        repo: Arc<R>,
        hasher: Arc<dyn SecretHasher>,
        minter: Arc<TokenMinter>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo,
            hasher,
            minter,
            config,
        }
    }

    pub async fn execute(&self, ctx: &RequestContext, input: LoginInput) -> AuthResult<LoginOutput> {
        let started = Instant::now();
        let request_id = ctx.request_id.as_str();
        tracing::info!(request_id, "login_attempt");

        let email = Email::new(&input.email).map_err(|_| {
            tracing::info!(request_id, "login_invalid_email");
            AuthError::InvalidEmail
        })?;

        let password = ClearTextPassword::for_verification(input.password);
        let Some(user) = self.repo.find_by_email(&email).await? else {
            // Same Argon2 work as a wrong password
            let dummy = self.hasher.dummy_hash().clone();
            let _ = verify_blocking(Arc::clone(&self.hasher), password, dummy).await;
            tracing::warn!(request_id, reason = "unknown_user", "login_invalid_credentials");
            return Err(AuthError::InvalidCredentials);
        };
        let user_id = user.user_id;

        match verify_blocking(Arc::clone(&self.hasher), password, user.password_hash).await {
            Ok(()) => {}
            Err(PasswordHashError::Mismatch) => {
                tracing::warn!(
                    request_id,
                    user_id = %user_id,
                    reason = "bad_password",
                    "login_invalid_credentials"
                );
                return Err(AuthError::InvalidCredentials);
            }
            Err(e) => return Err(e.into()),
        }

        let descriptor =
            resolve_device_descriptor(input.device_info.as_deref(), input.user_agent.as_deref())
                .map_err(|e| {
                    tracing::warn!(request_id, user_id = %user_id, reason = %e, "login_invalid_device");
                    AuthError::InvalidDeviceInfo
                })?;

        let access_token = self
            .minter
            .mint_access(user_id.into_uuid(), self.config.access_token_ttl)?;
        let refresh_secret = RefreshSecret::new(self.minter.mint_refresh()?);

        let db_started = Instant::now();
        let mut tx = self.repo.begin().await.map_err(|e| {
            tracing::error!(request_id, user_id = %user_id, error = %e, "login_db_failed");
            e
        })?;

        if let Err(e) = self
            .rotate(&mut tx, ctx, &user_id, descriptor, refresh_secret.hash())
            .await
        {
            tracing::error!(request_id, user_id = %user_id, error = %e, "login_db_failed");
            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(request_id, error = %rollback_err, "login rollback failed");
            }
            return Err(e);
        }

        tx.commit().await.map_err(|e| {
            tracing::error!(request_id, user_id = %user_id, error = %e, "login_db_failed");
            e
        })?;

        tracing::info!(
            request_id,
            user_id = %user_id,
            db_ms = db_started.elapsed().as_millis() as u64,
            total_ms = started.elapsed().as_millis() as u64,
            "login_success"
        );

        Ok(LoginOutput {
            user_id,
            access_token,
            refresh_secret,
        })
    }

    /// Find or create the device, revoke its live token, insert the new one
    async fn rotate(
        &self,
        tx: &mut R::Tx,
        ctx: &RequestContext,
        user_id: &UserId,
        descriptor: DeviceDescriptor,
        token_hash: RefreshTokenHash,
    ) -> AuthResult<()> {
        let now = Utc::now();

        let device = match tx.find_device(user_id, &descriptor).await? {
            Some(device) => {
                let revoked = tx.revoke_refresh(user_id, &device.device_id, now).await?;
                tracing::info!(
                    request_id = %ctx.request_id,
                    user_id = %user_id,
                    device_id = %device.device_id,
                    revoked,
                    "login_refresh_revoked"
                );
                device
            }
            None => {
                let device = Device::new(*user_id, descriptor);
                tx.create_device(&device).await?;
                tracing::info!(
                    request_id = %ctx.request_id,
                    user_id = %user_id,
                    device_id = %device.device_id,
                    "login_device_created"
                );
                device
            }
        };

        let token = RefreshToken::issue(
            *user_id,
            device.device_id,
            token_hash,
            now,
            self.config.refresh_token_ttl(),
        );
        tx.create_refresh(&token).await
    }
}
