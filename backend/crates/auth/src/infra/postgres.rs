//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::error::conversions::sqlstate;
use kernel::id::{DeviceId, RefreshTokenId, UserId};
use platform::client::{DeviceDescriptor, DeviceType};
use platform::password::HashedPassword;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::entity::{device::Device, refresh_token::RefreshToken, user::User};
use crate::domain::repository::{CredentialStore, CredentialTx, UserRepository};
use crate::domain::value_object::{email::Email, refresh_secret::RefreshTokenHash};
use crate::error::{AuthError, AuthResult};

const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Delete refresh tokens past their expiry
    pub async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < $1")
            .bind(Utc::now())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(tokens_deleted = deleted, "Cleaned up expired refresh tokens");

        Ok(deleted)
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT user_id, email, password_hash, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.map(|r| r.into_user()).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (user_id, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(user.email.as_str())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match sqlstate(&e).as_deref() {
            Some(UNIQUE_VIOLATION) => AuthError::EmailTaken,
            _ => AuthError::Database(e),
        })?;

        Ok(())
    }
}

// ============================================================================
// Credential Store Implementation
// ============================================================================

impl CredentialStore for PgAuthRepository {
    type Tx = PgCredentialTx;

    async fn begin(&self) -> AuthResult<PgCredentialTx> {
        let tx = self.pool.begin().await?;
        Ok(PgCredentialTx { tx })
    }

    async fn find_device(
        &self,
        user_id: &UserId,
        descriptor: &DeviceDescriptor,
    ) -> AuthResult<Option<Device>> {
        let mut conn = self.pool.acquire().await?;
        select_device(&mut conn, user_id, descriptor).await
    }

    async fn find_active_refresh(
        &self,
        user_id: &UserId,
        device_id: &DeviceId,
    ) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            r#"
            SELECT refresh_id, user_id, device_id, token_hash, created_at, expires_at, revoked_at
            FROM refresh_tokens
            WHERE user_id = $1 AND device_id = $2 AND revoked_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(device_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_refresh_token))
    }

    async fn revoke_refresh(
        &self,
        user_id: &UserId,
        device_id: &DeviceId,
        now: DateTime<Utc>,
    ) -> AuthResult<u64> {
        let mut conn = self.pool.acquire().await?;
        update_revoke(&mut conn, user_id, device_id, now).await
    }
}

/// Login unit of work. Dropping without `commit` rolls back.
pub struct PgCredentialTx {
    tx: Transaction<'static, Postgres>,
}

impl CredentialTx for PgCredentialTx {
    async fn find_device(
        &mut self,
        user_id: &UserId,
        descriptor: &DeviceDescriptor,
    ) -> AuthResult<Option<Device>> {
        select_device(&mut self.tx, user_id, descriptor).await
    }

    async fn create_device(&mut self, device: &Device) -> AuthResult<()> {
        let d = &device.descriptor;

        sqlx::query(
            r#"
            INSERT INTO device_info_logs (
                device_id,
                user_id,
                device_type,
                browser,
                browser_version,
                os,
                os_version,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(device.device_id.as_uuid())
        .bind(device.user_id.as_uuid())
        .bind(d.device_type.as_str())
        .bind(&d.browser)
        .bind(&d.browser_version)
        .bind(&d.os)
        .bind(&d.os_version)
        .bind(device.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn revoke_refresh(
        &mut self,
        user_id: &UserId,
        device_id: &DeviceId,
        now: DateTime<Utc>,
    ) -> AuthResult<u64> {
        update_revoke(&mut self.tx, user_id, device_id, now).await
    }

    async fn create_refresh(&mut self, token: &RefreshToken) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO refresh_tokens (
                refresh_id,
                user_id,
                device_id,
                token_hash,
                created_at,
                expires_at,
                revoked_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(token.refresh_id.as_uuid())
        .bind(token.user_id.as_uuid())
        .bind(token.device_id.as_uuid())
        .bind(token.token_hash.as_str())
        .bind(token.created_at)
        .bind(token.expires_at)
        .bind(token.revoked_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn commit(self) -> AuthResult<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> AuthResult<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}

// ============================================================================
// Shared statements (pool connection or open transaction)
// ============================================================================

async fn select_device(
    conn: &mut PgConnection,
    user_id: &UserId,
    descriptor: &DeviceDescriptor,
) -> AuthResult<Option<Device>> {
    let row = sqlx::query_as::<_, DeviceRow>(
        r#"
        SELECT device_id, user_id, device_type, browser, browser_version, os, os_version, created_at
        FROM device_info_logs
        WHERE user_id = $1
          AND device_type = $2
          AND browser = $3
          AND browser_version = $4
          AND os = $5
          AND os_version = $6
        "#,
    )
    .bind(user_id.as_uuid())
    .bind(descriptor.device_type.as_str())
    .bind(&descriptor.browser)
    .bind(&descriptor.browser_version)
    .bind(&descriptor.os)
    .bind(&descriptor.os_version)
    .fetch_optional(&mut *conn)
    .await?;

    row.map(|r| r.into_device()).transpose()
}

async fn update_revoke(
    conn: &mut PgConnection,
    user_id: &UserId,
    device_id: &DeviceId,
    now: DateTime<Utc>,
) -> AuthResult<u64> {
    let revoked = sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET revoked_at = $3
        WHERE user_id = $1 AND device_id = $2 AND revoked_at IS NULL
        "#,
    )
    .bind(user_id.as_uuid())
    .bind(device_id.as_uuid())
    .bind(now)
    .execute(&mut *conn)
    .await?
    .rows_affected();

    Ok(revoked)
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct DeviceRow {
    device_id: Uuid,
    user_id: Uuid,
    device_type: String,
    browser: String,
    browser_version: String,
    os: String,
    os_version: String,
    created_at: DateTime<Utc>,
}

impl DeviceRow {
    fn into_device(self) -> AuthResult<Device> {
        let device_type = DeviceType::parse(&self.device_type).ok_or_else(|| {
            AuthError::Internal(format!("Invalid device_type: {}", self.device_type))
        })?;

        Ok(Device {
            device_id: DeviceId::from_uuid(self.device_id),
            user_id: UserId::from_uuid(self.user_id),
            descriptor: DeviceDescriptor {
                device_type,
                browser: self.browser,
                browser_version: self.browser_version,
                os: self.os,
                os_version: self.os_version,
            },
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    refresh_id: Uuid,
    user_id: Uuid,
    device_id: Uuid,
    token_hash: String,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
    revoked_at: Option<DateTime<Utc>>,
}

impl RefreshTokenRow {
    fn into_refresh_token(self) -> RefreshToken {
        RefreshToken {
            refresh_id: RefreshTokenId::from_uuid(self.refresh_id),
            user_id: UserId::from_uuid(self.user_id),
            device_id: DeviceId::from_uuid(self.device_id),
            token_hash: RefreshTokenHash::from_db(self.token_hash),
            created_at: self.created_at,
            expires_at: self.expires_at,
            revoked_at: self.revoked_at,
        }
    }
}
