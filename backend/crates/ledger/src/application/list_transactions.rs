//! List Transactions Use Case
//!
//! Keyset pagination over (date DESC, id DESC). One extra "probe" row is
//! fetched to learn whether another page exists without a second query.

use std::sync::Arc;

use kernel::context::RequestContext;
use kernel::id::UserId;

use crate::application::config::LedgerConfig;
use crate::domain::entities::Transaction;
use crate::domain::repository::TransactionRepository;
use crate::domain::services::CursorSigner;
use crate::domain::value_objects::PageSize;
use crate::error::LedgerResult;

/// List input
pub struct ListTransactionsInput {
    /// Opaque token from the previous page; empty for the first page
    pub cursor: String,
    pub page_size: i32,
}

/// One page of transactions
#[derive(Debug)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    /// Empty when `has_more` is false
    pub next_cursor: String,
    pub has_more: bool,
    pub clamped: bool,
    pub effective_size: i32,
}

/// List transactions use case
pub struct ListTransactionsUseCase<R>
where
    R: TransactionRepository,
{
    repo: Arc<R>,
    signer: Arc<CursorSigner>,
    config: Arc<LedgerConfig>,
}

impl<R> ListTransactionsUseCase<R>
where
    R: TransactionRepository,
{
    pub fn new(repo: Arc<R>, signer: Arc<CursorSigner>, config: Arc<LedgerConfig>) -> Self {
        Self {
            repo,
            signer,
            config,
        }
    }

    pub async fn execute(
        &self,
        ctx: &RequestContext,
        user_id: &UserId,
        input: ListTransactionsInput,
    ) -> LedgerResult<TransactionPage> {
        let page_size = PageSize::new(input.page_size, self.config.max_page_size)?;
        let cursor = self.signer.decode(&input.cursor)?;
        let limit = page_size.fetch_limit();

        let mut transactions = match &cursor {
            None => self.repo.first_page(user_id, limit).await?,
            Some(cursor) => self.repo.next_page(user_id, cursor, limit).await?,
        };

        let has_more = transactions.len() > page_size.effective as usize;
        transactions.truncate(page_size.effective as usize);

        let next_cursor = match transactions.last() {
            Some(last) if has_more => self.signer.encode(&last.cursor())?,
            _ => String::new(),
        };

        tracing::debug!(
            request_id = %ctx.request_id,
            user_id = %user_id,
            returned = transactions.len(),
            has_more,
            clamped = page_size.clamped,
            continuation = cursor.is_some(),
            "Listed transactions"
        );

        Ok(TransactionPage {
            transactions,
            next_cursor,
            has_more,
            clamped: page_size.clamped,
            effective_size: page_size.effective,
        })
    }
}
