//! Get Transaction Use Case

use std::sync::Arc;

use kernel::id::{TransactionId, UserId};

use crate::domain::entities::Transaction;
use crate::domain::repository::TransactionRepository;
use crate::error::{LedgerError, LedgerResult};

/// Get transaction use case
pub struct GetTransactionUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> GetTransactionUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, user_id: &UserId, id: &TransactionId) -> LedgerResult<Transaction> {
        self.repo
            .find(user_id, id)
            .await?
            .ok_or(LedgerError::TransactionNotFound)
    }
}
