//! Application Layer
//!
//! Use cases for transactions and categories.

pub mod config;
pub mod create_transaction;
pub mod delete_transaction;
pub mod get_transaction;
pub mod list_categories;
pub mod list_transactions;
pub mod update_transaction;

// Re-exports
pub use config::LedgerConfig;
pub use create_transaction::{CreateTransactionUseCase, TransactionInput};
pub use delete_transaction::DeleteTransactionUseCase;
pub use get_transaction::GetTransactionUseCase;
pub use list_categories::ListCategoriesUseCase;
pub use list_transactions::{ListTransactionsInput, ListTransactionsUseCase, TransactionPage};
pub use update_transaction::UpdateTransactionUseCase;
