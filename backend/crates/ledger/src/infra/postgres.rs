//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::conversions::sqlstate;
use kernel::id::{TransactionId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entities::{Category, Transaction, TransactionFields};
use crate::domain::repository::{CategoryRepository, TransactionRepository};
use crate::domain::services::Cursor;
use crate::domain::value_objects::{Cents, Merchant};
use crate::error::{LedgerError, LedgerResult};

const FOREIGN_KEY_VIOLATION: &str = "23503";
const CHECK_VIOLATION: &str = "23514";
const CATEGORY_FOREIGN_KEY: &str = "transactions_detailed_category_fkey";
const AMOUNT_CHECK: &str = "transactions_amount_nonzero";

const TRANSACTION_COLUMNS: &str = "transaction_id, user_id, transaction_date, merchant, amount_cents, detailed_category_id, updated_at";

/// PostgreSQL-backed ledger repository
#[derive(Clone)]
pub struct PgLedgerRepository {
    pool: PgPool,
}

impl PgLedgerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Constraint violations become validation errors; the rest stay database errors
fn map_write_error(err: sqlx::Error) -> LedgerError {
    let constraint = match &err {
        sqlx::Error::Database(db) => db.constraint().map(str::to_string),
        _ => None,
    };
    match (sqlstate(&err).as_deref(), constraint.as_deref()) {
        (Some(FOREIGN_KEY_VIOLATION), Some(CATEGORY_FOREIGN_KEY)) => LedgerError::InvalidCategory,
        (Some(CHECK_VIOLATION), Some(AMOUNT_CHECK)) => LedgerError::InvalidAmount,
        _ => LedgerError::Database(err),
    }
}

// ============================================================================
// Transaction Repository Implementation
// ============================================================================

impl TransactionRepository for PgLedgerRepository {
    async fn first_page(&self, user_id: &UserId, limit: i64) -> LedgerResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1
            ORDER BY transaction_date DESC, transaction_id DESC
            LIMIT $2
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionRow::into_transaction).collect())
    }

    async fn next_page(
        &self,
        user_id: &UserId,
        cursor: &Cursor,
        limit: i64,
    ) -> LedgerResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1
              AND (transaction_date, transaction_id) < ($2, $3)
            ORDER BY transaction_date DESC, transaction_id DESC
            LIMIT $4
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(cursor.date)
        .bind(cursor.id.as_uuid())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(TransactionRow::into_transaction).collect())
    }

    async fn find(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            SELECT {TRANSACTION_COLUMNS}
            FROM transactions
            WHERE user_id = $1 AND transaction_id = $2
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(TransactionRow::into_transaction))
    }

    async fn create(&self, transaction: &Transaction) -> LedgerResult<Transaction> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            INSERT INTO transactions (
                transaction_id,
                user_id,
                transaction_date,
                merchant,
                amount_cents,
                detailed_category_id,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(transaction.id.as_uuid())
        .bind(transaction.user_id.as_uuid())
        .bind(transaction.date)
        .bind(transaction.merchant.as_str())
        .bind(transaction.amount.value())
        .bind(transaction.detailed_category)
        .bind(transaction.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.into_transaction())
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: &TransactionId,
        fields: &TransactionFields,
        now: DateTime<Utc>,
    ) -> LedgerResult<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            r#"
            UPDATE transactions
            SET transaction_date = $3,
                merchant = $4,
                amount_cents = $5,
                detailed_category_id = $6,
                updated_at = $7
            WHERE user_id = $1 AND transaction_id = $2
            RETURNING {TRANSACTION_COLUMNS}
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(id.as_uuid())
        .bind(fields.date)
        .bind(fields.merchant.as_str())
        .bind(fields.amount.value())
        .bind(fields.detailed_category)
        .bind(now)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        Ok(row.map(TransactionRow::into_transaction))
    }

    async fn delete(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<bool> {
        let deleted = sqlx::query("DELETE FROM transactions WHERE user_id = $1 AND transaction_id = $2")
            .bind(user_id.as_uuid())
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Category Repository Implementation
// ============================================================================

impl CategoryRepository for PgLedgerRepository {
    async fn list(&self) -> LedgerResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT d.detailed_category_id,
                   d.name AS detailed_name,
                   p.primary_category_id,
                   p.name AS primary_name
            FROM detailed_categories d
            JOIN primary_categories p ON p.primary_category_id = d.primary_category_id
            ORDER BY d.detailed_category_id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CategoryRow::into_category).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct TransactionRow {
    transaction_id: Uuid,
    user_id: Uuid,
    transaction_date: NaiveDate,
    merchant: String,
    amount_cents: i64,
    detailed_category_id: i32,
    updated_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> Transaction {
        Transaction {
            id: TransactionId::from_uuid(self.transaction_id),
            user_id: UserId::from_uuid(self.user_id),
            date: self.transaction_date,
            merchant: Merchant::from_db(self.merchant),
            amount: Cents::new(self.amount_cents),
            detailed_category: self.detailed_category_id,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    detailed_category_id: i32,
    detailed_name: String,
    primary_category_id: i32,
    primary_name: String,
}

impl CategoryRow {
    fn into_category(self) -> Category {
        Category {
            id: self.detailed_category_id,
            name: self.detailed_name,
            primary_id: self.primary_category_id,
            primary_name: self.primary_name,
        }
    }
}
