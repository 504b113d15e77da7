//! Update Transaction Use Case
//!
//! Full replacement of the user-editable fields.

use std::sync::Arc;

use chrono::Utc;
use kernel::context::RequestContext;
use kernel::id::{TransactionId, UserId};

use crate::application::create_transaction::TransactionInput;
use crate::domain::entities::Transaction;
use crate::domain::repository::TransactionRepository;
use crate::error::{LedgerError, LedgerResult};

/// Update transaction use case
pub struct UpdateTransactionUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateTransactionUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Returns the stored row, including the server-set `updated_at`
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
        id: &TransactionId,
        input: TransactionInput,
    ) -> LedgerResult<Transaction> {
        let fields = input.into_fields()?;

        let transaction = self
            .repo
            .update(user_id, id, &fields, Utc::now())
            .await?
            .ok_or(LedgerError::TransactionNotFound)?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user_id,
            transaction_id = %id,
            "Transaction updated"
        );

        Ok(transaction)
    }
}
