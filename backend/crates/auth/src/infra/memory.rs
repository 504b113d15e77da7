//! In-Memory Repository
//!
//! Same traits as the Postgres store, backed by a mutex-guarded snapshot.
//! Transactions stage their writes and replay them on `commit`, so a
//! dropped or rolled-back transaction leaves no trace.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use kernel::id::{DeviceId, UserId};
use platform::client::DeviceDescriptor;
use tokio::sync::Mutex;

use crate::domain::entity::{device::Device, refresh_token::RefreshToken, user::User};
use crate::domain::repository::{CredentialStore, CredentialTx, UserRepository};
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Default)]
struct MemoryState {
    users: Vec<User>,
    devices: Vec<Device>,
    refresh_tokens: Vec<RefreshToken>,
}

impl MemoryState {
    fn find_device(&self, user_id: &UserId, descriptor: &DeviceDescriptor) -> Option<&Device> {
        self.devices.iter().find(|d| d.matches(user_id, descriptor))
    }

    fn active_refresh(&self, user_id: &UserId, device_id: &DeviceId) -> Option<&RefreshToken> {
        self.refresh_tokens
            .iter()
            .find(|t| t.user_id == *user_id && t.device_id == *device_id && !t.is_revoked())
    }

    /// Mirrors the unique indexes on `device_info_logs` and `refresh_tokens`
    fn check(&self, op: &StagedOp) -> AuthResult<()> {
        match op {
            StagedOp::CreateDevice(device)
                if self.find_device(&device.user_id, &device.descriptor).is_some() =>
            {
                Err(AuthError::Internal("duplicate device".into()))
            }
            StagedOp::CreateRefresh(token)
                if self.active_refresh(&token.user_id, &token.device_id).is_some() =>
            {
                Err(AuthError::Internal("device already has an active refresh token".into()))
            }
            _ => Ok(()),
        }
    }

    fn revoke(&mut self, user_id: &UserId, device_id: &DeviceId, now: DateTime<Utc>) -> u64 {
        let mut revoked = 0;
        for token in self
            .refresh_tokens
            .iter_mut()
            .filter(|t| t.user_id == *user_id && t.device_id == *device_id && !t.is_revoked())
        {
            token.revoke(now);
            revoked += 1;
        }
        revoked
    }

    fn apply(&mut self, op: StagedOp) {
        match op {
            StagedOp::CreateDevice(device) => self.devices.push(device),
            StagedOp::Revoke {
                user_id,
                device_id,
                at,
            } => {
                self.revoke(&user_id, &device_id, at);
            }
            StagedOp::CreateRefresh(token) => self.refresh_tokens.push(token),
        }
    }
}

#[derive(Debug, Clone)]
enum StagedOp {
    CreateDevice(Device),
    Revoke {
        user_id: UserId,
        device_id: DeviceId,
        at: DateTime<Utc>,
    },
    CreateRefresh(RefreshToken),
}

/// In-memory auth repository for tests and local runs
#[derive(Clone, Default)]
pub struct InMemoryAuthRepository {
    state: Arc<Mutex<MemoryState>>,
    fail_refresh_insert: Arc<AtomicBool>,
}

impl InMemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a user without going through sign-up
    pub async fn insert_user(&self, user: User) {
        self.state.lock().await.users.push(user);
    }

    pub async fn insert_device(&self, device: Device) {
        self.state.lock().await.devices.push(device);
    }

    pub async fn insert_refresh(&self, token: RefreshToken) {
        self.state.lock().await.refresh_tokens.push(token);
    }

    pub async fn devices(&self) -> Vec<Device> {
        self.state.lock().await.devices.clone()
    }

    pub async fn refresh_tokens(&self) -> Vec<RefreshToken> {
        self.state.lock().await.refresh_tokens.clone()
    }

    /// The next transaction fails on its refresh insert
    pub fn fail_next_refresh_insert(&self) {
        self.fail_refresh_insert.store(true, Ordering::SeqCst);
    }
}

impl UserRepository for InMemoryAuthRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.iter().find(|u| u.email == *email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let state = self.state.lock().await;
        Ok(state.users.iter().any(|u| u.email == *email))
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut state = self.state.lock().await;
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }
        state.users.push(user.clone());
        Ok(())
    }
}

impl CredentialStore for InMemoryAuthRepository {
    type Tx = InMemoryCredentialTx;

    async fn begin(&self) -> AuthResult<InMemoryCredentialTx> {
        let snapshot = self.state.lock().await.clone();
        Ok(InMemoryCredentialTx {
            shared: Arc::clone(&self.state),
            staged: snapshot,
            ops: Vec::new(),
            fail_refresh_insert: self.fail_refresh_insert.swap(false, Ordering::SeqCst),
        })
    }

    async fn find_device(
        &self,
        user_id: &UserId,
        descriptor: &DeviceDescriptor,
    ) -> AuthResult<Option<Device>> {
        let state = self.state.lock().await;
        Ok(state.find_device(user_id, descriptor).cloned())
    }

    async fn find_active_refresh(
        &self,
        user_id: &UserId,
        device_id: &DeviceId,
    ) -> AuthResult<Option<RefreshToken>> {
        let state = self.state.lock().await;
        Ok(state.active_refresh(user_id, device_id).cloned())
    }

    async fn revoke_refresh(
        &self,
        user_id: &UserId,
        device_id: &DeviceId,
        now: DateTime<Utc>,
    ) -> AuthResult<u64> {
        let mut state = self.state.lock().await;
        Ok(state.revoke(user_id, device_id, now))
    }
}

/// Staged writes over a snapshot taken at `begin`
pub struct InMemoryCredentialTx {
    shared: Arc<Mutex<MemoryState>>,
    staged: MemoryState,
    ops: Vec<StagedOp>,
    fail_refresh_insert: bool,
}

impl InMemoryCredentialTx {
    fn stage(&mut self, op: StagedOp) -> AuthResult<()> {
        self.staged.check(&op)?;
        self.staged.apply(op.clone());
        self.ops.push(op);
        Ok(())
    }
}

impl CredentialTx for InMemoryCredentialTx {
    async fn find_device(
        &mut self,
        user_id: &UserId,
        descriptor: &DeviceDescriptor,
    ) -> AuthResult<Option<Device>> {
        Ok(self.staged.find_device(user_id, descriptor).cloned())
    }

    async fn create_device(&mut self, device: &Device) -> AuthResult<()> {
        self.stage(StagedOp::CreateDevice(device.clone()))
    }

    async fn revoke_refresh(
        &mut self,
        user_id: &UserId,
        device_id: &DeviceId,
        now: DateTime<Utc>,
    ) -> AuthResult<u64> {
        let revoked = self
            .staged
            .refresh_tokens
            .iter()
            .filter(|t| t.user_id == *user_id && t.device_id == *device_id && !t.is_revoked())
            .count() as u64;
        self.stage(StagedOp::Revoke {
            user_id: *user_id,
            device_id: *device_id,
            at: now,
        })?;
        Ok(revoked)
    }

    async fn create_refresh(&mut self, token: &RefreshToken) -> AuthResult<()> {
        if self.fail_refresh_insert {
            return Err(AuthError::Internal("refresh insert failed".into()));
        }
        self.stage(StagedOp::CreateRefresh(token.clone()))
    }

    /// Re-checks every staged write against the state committed since
    /// `begin`; a conflict discards the whole transaction.
    async fn commit(self) -> AuthResult<()> {
        let mut state = self.shared.lock().await;
        let mut next = state.clone();
        for op in self.ops {
            next.check(&op)?;
            next.apply(op);
        }
        *state = next;
        Ok(())
    }

    async fn rollback(self) -> AuthResult<()> {
        Ok(())
    }
}
