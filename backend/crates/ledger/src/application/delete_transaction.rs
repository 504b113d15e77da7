//! Delete Transaction Use Case

use std::sync::Arc;

use kernel::context::RequestContext;
use kernel::id::{TransactionId, UserId};

use crate::domain::repository::TransactionRepository;
use crate::error::{LedgerError, LedgerResult};

/// Delete transaction use case
pub struct DeleteTransactionUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> DeleteTransactionUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `TransactionNotFound` when no row belongs to this user
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
        id: &TransactionId,
    ) -> LedgerResult<()> {
        if !self.repo.delete(user_id, id).await? {
            return Err(LedgerError::TransactionNotFound);
        }

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user_id,
            transaction_id = %id,
            "Transaction deleted"
        );

        Ok(())
    }
}
