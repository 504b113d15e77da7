//! Ledger Error Types
//!
//! This module provides ledger-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::services::CursorError;

/// Ledger-specific result type alias
pub type LedgerResult<T> = Result<T, LedgerError>;

/// Ledger-specific error variants
///
/// Variants map to HTTP status codes; only `public_message` is ever shown
/// to clients.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Date is not `YYYY-MM-DD`
    #[error("Invalid date format")]
    InvalidDateFormat,

    /// Amount is zero or out of range
    #[error("Invalid amount")]
    InvalidAmount,

    /// Merchant is blank
    #[error("Invalid merchant")]
    InvalidMerchant,

    /// Unknown detailed category
    #[error("Invalid category")]
    InvalidCategory,

    /// Path id is not a UUID
    #[error("Invalid transaction id")]
    InvalidTransactionId,

    /// `limit` is not an integer
    #[error("Invalid limit")]
    InvalidLimit,

    /// `limit` is zero or negative
    #[error("Page size must be positive")]
    InvalidPageSizeNonPositive,

    /// Cursor malformed or tampered
    #[error("Cursor error: {0}")]
    Cursor(#[from] CursorError),

    /// No such transaction for this user
    #[error("Transaction not found")]
    TransactionNotFound,

    /// Body missing or not valid JSON for the endpoint
    #[error("Invalid request body")]
    InvalidRequestBody,

    /// Query string could not be parsed
    #[error("Invalid query")]
    InvalidQuery,

    /// No authenticated user on the request
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LedgerError {
    /// Message rendered in the response envelope
    pub fn public_message(&self) -> &'static str {
        match self {
            LedgerError::InvalidDateFormat => "invalid date format",
            LedgerError::InvalidAmount => "invalid amount",
            LedgerError::InvalidMerchant => "invalid merchant",
            LedgerError::InvalidCategory => "invalid category",
            LedgerError::InvalidTransactionId => "invalid transaction id",
            LedgerError::InvalidLimit => "invalid limit",
            LedgerError::InvalidPageSizeNonPositive => "page size must be positive",
            LedgerError::Cursor(CursorError::KeyMissing | CursorError::KeyTooShort { .. }) => {
                "internal server error"
            }
            LedgerError::Cursor(_) => "invalid cursor",
            LedgerError::TransactionNotFound => "transaction not found",
            LedgerError::InvalidRequestBody => "invalid request body",
            LedgerError::InvalidQuery => "invalid query",
            LedgerError::Unauthenticated => "unauthorized",
            LedgerError::Database(_) | LedgerError::Internal(_) => "internal server error",
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::InvalidDateFormat
            | LedgerError::InvalidAmount
            | LedgerError::InvalidMerchant
            | LedgerError::InvalidCategory
            | LedgerError::InvalidTransactionId
            | LedgerError::InvalidLimit
            | LedgerError::InvalidPageSizeNonPositive
            | LedgerError::InvalidRequestBody
            | LedgerError::InvalidQuery => ErrorKind::BadRequest,
            LedgerError::Cursor(CursorError::KeyMissing | CursorError::KeyTooShort { .. }) => {
                ErrorKind::InternalServerError
            }
            LedgerError::Cursor(_) => ErrorKind::BadRequest,
            LedgerError::TransactionNotFound => ErrorKind::NotFound,
            LedgerError::Unauthenticated => ErrorKind::Unauthorized,
            LedgerError::Database(_) | LedgerError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Convert to AppError; the original error is kept as its source
    pub fn into_app_error(self) -> AppError {
        AppError::new(self.kind(), self.public_message()).with_source(self)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LedgerError::Database(e) => {
                tracing::error!(error = %e, "Ledger database error");
            }
            LedgerError::Internal(msg) => {
                tracing::error!(message = %msg, "Ledger internal error");
            }
            LedgerError::Cursor(CursorError::BadSignature) => {
                tracing::warn!("Tampered cursor rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Ledger error");
            }
        }
    }
}

impl IntoResponse for LedgerError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for LedgerError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        LedgerError::InvalidRequestBody
    }
}

impl From<QueryRejection> for LedgerError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected query string");
        LedgerError::InvalidQuery
    }
}
