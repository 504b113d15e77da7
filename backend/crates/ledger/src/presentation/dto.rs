//! API DTOs (Data Transfer Objects)
//!
//! Amounts cross the wire as JSON numbers in dollars.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::{Category, Transaction};
use crate::domain::value_objects::TransactionDate;

// ============================================================================
// Transactions
// ============================================================================

/// Create and full-update body
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub date: String,
    pub merchant: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub detailed_category: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionResponse {
    pub id: Uuid,
    /// `YYYY-MM-DD`
    pub date: String,
    pub merchant: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub detailed_category: i32,
    pub updated_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionResponse {
    fn from(t: Transaction) -> Self {
        Self {
            id: t.id.into_uuid(),
            date: TransactionDate::from(t.date).to_string(),
            merchant: t.merchant.as_str().to_string(),
            amount: t.amount.to_dollars(),
            detailed_category: t.detailed_category,
            updated_at: t.updated_at,
        }
    }
}

/// `GET /transactions` query; both values are kept as strings so parse
/// failures map to our own errors
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<String>,
    pub cursor: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionListResponse {
    pub transactions: Vec<TransactionResponse>,
    pub next_cursor: String,
    pub has_more_data: bool,
    pub clamped: bool,
    pub effective_size: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTransactionResponse {
    pub transaction_deleted: String,
}

// ============================================================================
// Categories
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: i32,
    pub name: String,
    pub primary_category_id: i32,
    pub primary_category_name: String,
}

impl From<Category> for CategoryResponse {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            primary_category_id: c.primary_id,
            primary_category_name: c.primary_name,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<CategoryResponse>,
}
