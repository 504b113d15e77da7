//! Ledger Router

use axum::{Router, routing::get};

use crate::domain::repository::{CategoryRepository, TransactionRepository};
use crate::presentation::handlers::{self, LedgerAppState};

/// Authenticated ledger routes, nested under `/app` behind
/// `require_access_token`
pub fn ledger_router<R>(state: LedgerAppState<R>) -> Router
where
    R: TransactionRepository + CategoryRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/transactions",
            get(handlers::list_transactions::<R>).post(handlers::create_transaction::<R>),
        )
        .route(
            "/transactions/{id}",
            get(handlers::get_transaction::<R>)
                .post(handlers::update_transaction::<R>)
                .delete(handlers::delete_transaction::<R>),
        )
        .route("/categories", get(handlers::list_categories::<R>))
        .with_state(state)
}
