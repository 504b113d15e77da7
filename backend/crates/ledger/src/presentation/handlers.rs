//! HTTP Handlers
//!
//! Every route sits behind the access-token middleware, so the user id is
//! read from the `RequestContext` it stored.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use kernel::context::RequestContext;
use kernel::envelope::Envelope;
use kernel::id::{TransactionId, UserId};

use crate::application::config::LedgerConfig;
use crate::application::{
    CreateTransactionUseCase, DeleteTransactionUseCase, GetTransactionUseCase,
    ListCategoriesUseCase, ListTransactionsInput, ListTransactionsUseCase, TransactionInput,
    UpdateTransactionUseCase,
};
use crate::domain::repository::{CategoryRepository, TransactionRepository};
use crate::domain::services::{CursorError, CursorSigner};
use crate::error::{LedgerError, LedgerResult};
use crate::presentation::dto::{
    CategoryListResponse, DeleteTransactionResponse, ListQuery, TransactionListResponse,
    TransactionRequest, TransactionResponse,
};

/// Shared state for ledger handlers
#[derive(Clone)]
pub struct LedgerAppState<R>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<LedgerConfig>,
    pub signer: Arc<CursorSigner>,
}

impl<R> LedgerAppState<R>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    /// Fails when the cursor key is missing or shorter than 32 bytes
    pub fn new(repo: R, config: LedgerConfig) -> Result<Self, CursorError> {
        let signer = Arc::new(config.cursor_signer()?);
        Ok(Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            signer,
        })
    }
}

fn current_user(ctx: &RequestContext) -> LedgerResult<UserId> {
    ctx.user_id.ok_or(LedgerError::Unauthenticated)
}

fn parse_transaction_id(raw: &str) -> LedgerResult<TransactionId> {
    raw.parse().map_err(|_| LedgerError::InvalidTransactionId)
}

/// Missing `limit` falls back to the default; out-of-range integers
/// saturate so the page-size policy sees them
fn parse_limit(raw: Option<&str>, default: i32) -> LedgerResult<i32> {
    let Some(raw) = raw else {
        return Ok(default);
    };
    let limit: i64 = raw.trim().parse().map_err(|_| LedgerError::InvalidLimit)?;
    Ok(limit.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
}

fn into_input(req: TransactionRequest) -> TransactionInput {
    TransactionInput {
        date: req.date,
        merchant: req.merchant,
        amount: req.amount,
        detailed_category: req.detailed_category,
    }
}

// ============================================================================
// Transactions
// ============================================================================

/// GET /transactions?limit=&cursor=
pub async fn list_transactions<R>(
    State(state): State<LedgerAppState<R>>,
    ctx: RequestContext,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> LedgerResult<impl IntoResponse>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let user_id = current_user(&ctx)?;
    let Query(query) = query?;

    let input = ListTransactionsInput {
        cursor: query.cursor.unwrap_or_default(),
        page_size: parse_limit(query.limit.as_deref(), state.config.default_page_size)?,
    };

    let use_case = ListTransactionsUseCase::new(
        state.repo.clone(),
        state.signer.clone(),
        state.config.clone(),
    );
    let page = use_case.execute(&ctx, &user_id, input).await?;

    Ok(Envelope::ok(TransactionListResponse {
        transactions: page.transactions.into_iter().map(Into::into).collect(),
        next_cursor: page.next_cursor,
        has_more_data: page.has_more,
        clamped: page.clamped,
        effective_size: page.effective_size,
    }))
}

/// POST /transactions
pub async fn create_transaction<R>(
    State(state): State<LedgerAppState<R>>,
    ctx: RequestContext,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> LedgerResult<impl IntoResponse>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let user_id = current_user(&ctx)?;
    let Json(req) = payload?;

    let use_case = CreateTransactionUseCase::new(state.repo.clone());
    let transaction = use_case.execute(&ctx, &user_id, into_input(req)).await?;

    Ok((
        StatusCode::CREATED,
        Envelope::ok(TransactionResponse::from(transaction)),
    ))
}

/// GET /transactions/{id}
pub async fn get_transaction<R>(
    State(state): State<LedgerAppState<R>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> LedgerResult<impl IntoResponse>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let user_id = current_user(&ctx)?;
    let id = parse_transaction_id(&id)?;

    let use_case = GetTransactionUseCase::new(state.repo.clone());
    let transaction = use_case.execute(&user_id, &id).await?;

    Ok(Envelope::ok(TransactionResponse::from(transaction)))
}

/// POST /transactions/{id}
pub async fn update_transaction<R>(
    State(state): State<LedgerAppState<R>>,
    ctx: RequestContext,
    Path(id): Path<String>,
    payload: Result<Json<TransactionRequest>, JsonRejection>,
) -> LedgerResult<impl IntoResponse>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let user_id = current_user(&ctx)?;
    let id = parse_transaction_id(&id)?;
    let Json(req) = payload?;

    let use_case = UpdateTransactionUseCase::new(state.repo.clone());
    let transaction = use_case.execute(&ctx, &user_id, &id, into_input(req)).await?;

    Ok(Envelope::ok(TransactionResponse::from(transaction)))
}

/// DELETE /transactions/{id}
pub async fn delete_transaction<R>(
    State(state): State<LedgerAppState<R>>,
    ctx: RequestContext,
    Path(id): Path<String>,
) -> LedgerResult<impl IntoResponse>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let user_id = current_user(&ctx)?;
    let id = parse_transaction_id(&id)?;

    let use_case = DeleteTransactionUseCase::new(state.repo.clone());
    use_case.execute(&ctx, &user_id, &id).await?;

    Ok(Envelope::ok(DeleteTransactionResponse {
        transaction_deleted: "success".to_string(),
    }))
}

// ============================================================================
// Categories
// ============================================================================

/// GET /categories
pub async fn list_categories<R>(
    State(state): State<LedgerAppState<R>>,
) -> LedgerResult<impl IntoResponse>
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    let use_case = ListCategoriesUseCase::new(state.repo.clone());
    let categories = use_case.execute().await?;

    Ok(Envelope::ok(CategoryListResponse {
        categories: categories.into_iter().map(Into::into).collect(),
    }))
}
