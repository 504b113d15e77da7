//! Repository Traits
//!
//! Interfaces for data persistence. Every transaction query is scoped to
//! the owning user.

use chrono::{DateTime, Utc};
use kernel::id::{TransactionId, UserId};

use crate::domain::entities::{Category, Transaction, TransactionFields};
use crate::domain::services::Cursor;
use crate::error::LedgerResult;

/// Transaction repository trait
#[trait_variant::make(TransactionRepository: Send)]
pub trait LocalTransactionRepository {
    /// Newest rows first: (date DESC, id DESC), at most `limit`
    async fn first_page(&self, user_id: &UserId, limit: i64) -> LedgerResult<Vec<Transaction>>;

    /// Rows strictly after `cursor` in the same ordering
    async fn next_page(
        &self,
        user_id: &UserId,
        cursor: &Cursor,
        limit: i64,
    ) -> LedgerResult<Vec<Transaction>>;

    async fn find(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<Option<Transaction>>;

    /// Insert and return the stored row. Unknown category yields
    /// `LedgerError::InvalidCategory`.
    async fn create(&self, transaction: &Transaction) -> LedgerResult<Transaction>;

    /// `None` when no row matched (user, id)
    async fn update(
        &self,
        user_id: &UserId,
        id: &TransactionId,
        fields: &TransactionFields,
        now: DateTime<Utc>,
    ) -> LedgerResult<Option<Transaction>>;

    /// `false` when no row matched (user, id)
    async fn delete(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<bool>;
}

/// Category lookup
#[trait_variant::make(CategoryRepository: Send)]
pub trait LocalCategoryRepository {
    async fn list(&self) -> LedgerResult<Vec<Category>>;
}
