//! In-Memory Repository
//!
//! Same traits as the Postgres store. Categories are seeded from
//! `DEFAULT_CATEGORIES`; writes enforce the same constraints as the
//! migrations (known category, nonzero amount).

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::{TransactionId, UserId};
use tokio::sync::Mutex;

use crate::domain::entities::{Category, Transaction, TransactionFields};
use crate::domain::repository::{CategoryRepository, TransactionRepository};
use crate::domain::services::Cursor;
use crate::error::{LedgerError, LedgerResult};

#[derive(Debug, Default)]
struct MemoryState {
    transactions: Vec<Transaction>,
    categories: Vec<Category>,
}

impl MemoryState {
    fn check_constraints(&self, category: i32, amount: i64) -> LedgerResult<()> {
        if !self.categories.iter().any(|c| c.id == category) {
            return Err(LedgerError::InvalidCategory);
        }
        if amount == 0 {
            return Err(LedgerError::InvalidAmount);
        }
        Ok(())
    }

    /// Rows of one user matching `keep`, newest first, at most `limit`
    fn page(
        &self,
        user_id: &UserId,
        limit: i64,
        keep: impl Fn(&Transaction) -> bool,
    ) -> Vec<Transaction> {
        let mut rows: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|t| t.user_id == *user_id && keep(t))
            .cloned()
            .collect();
        rows.sort_by_key(|t| Reverse((t.date, t.id.into_uuid())));
        rows.truncate(usize::try_from(limit).unwrap_or(0));
        rows
    }
}

/// In-memory ledger repository for tests and local runs
#[derive(Clone)]
pub struct InMemoryLedgerRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl Default for InMemoryLedgerRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryLedgerRepository {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MemoryState {
                transactions: Vec::new(),
                categories: Category::defaults(),
            })),
        }
    }

    /// Seed a row directly, bypassing constraint checks
    pub async fn insert_transaction(&self, transaction: Transaction) {
        self.state.lock().await.transactions.push(transaction);
    }

    pub async fn transactions(&self) -> Vec<Transaction> {
        self.state.lock().await.transactions.clone()
    }
}

impl TransactionRepository for InMemoryLedgerRepository {
    async fn first_page(&self, user_id: &UserId, limit: i64) -> LedgerResult<Vec<Transaction>> {
        Ok(self.state.lock().await.page(user_id, limit, |_| true))
    }

    async fn next_page(
        &self,
        user_id: &UserId,
        cursor: &Cursor,
        limit: i64,
    ) -> LedgerResult<Vec<Transaction>> {
        let after = (cursor.date, cursor.id.into_uuid());
        Ok(self
            .state
            .lock()
            .await
            .page(user_id, limit, |t| (t.date, t.id.into_uuid()) < after))
    }

    async fn find(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<Option<Transaction>> {
        Ok(self
            .state
            .lock()
            .await
            .transactions
            .iter()
            .find(|t| t.user_id == *user_id && t.id == *id)
            .cloned())
    }

    async fn create(&self, transaction: &Transaction) -> LedgerResult<Transaction> {
        let mut state = self.state.lock().await;
        state.check_constraints(transaction.detailed_category, transaction.amount.value())?;
        state.transactions.push(transaction.clone());
        Ok(transaction.clone())
    }

    async fn update(
        &self,
        user_id: &UserId,
        id: &TransactionId,
        fields: &TransactionFields,
        now: DateTime<Utc>,
    ) -> LedgerResult<Option<Transaction>> {
        let mut state = self.state.lock().await;
        state.check_constraints(fields.detailed_category, fields.amount.value())?;

        let Some(row) = state
            .transactions
            .iter_mut()
            .find(|t| t.user_id == *user_id && t.id == *id)
        else {
            return Ok(None);
        };
        row.apply(fields.clone(), now);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<bool> {
        let mut state = self.state.lock().await;
        let before = state.transactions.len();
        state
            .transactions
            .retain(|t| !(t.user_id == *user_id && t.id == *id));
        Ok(state.transactions.len() < before)
    }
}

impl CategoryRepository for InMemoryLedgerRepository {
    async fn list(&self) -> LedgerResult<Vec<Category>> {
        Ok(self.state.lock().await.categories.clone())
    }
}
