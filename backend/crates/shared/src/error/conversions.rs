//! Error conversions
//!
//! SQLSTATE inspection for store errors and the HTTP rendering of
//! [`AppError`].

#[cfg(feature = "axum")]
use super::app_error::AppError;

// ============================================================================
// SQLx (feature-gated)
// ============================================================================

/// Postgres SQLSTATE of a database error, if any
#[cfg(feature = "sqlx")]
pub fn sqlstate(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().map(|c| c.into_owned()),
        _ => None,
    }
}

// ============================================================================
// Axum (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::http::StatusCode;

        use crate::envelope::Envelope;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Envelope::error(self.message().to_owned())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlstate_only_for_database_errors() {
        assert!(sqlstate(&sqlx::Error::RowNotFound).is_none());
        assert!(sqlstate(&sqlx::Error::PoolTimedOut).is_none());
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_app_error_renders_envelope() {
        use axum::response::IntoResponse;

        use crate::error::kind::ErrorKind;

        let response = AppError::new(ErrorKind::NotFound, "transaction not found").into_response();
        assert_eq!(response.status().as_u16(), 404);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"data": {"error": "transaction not found"}})
        );
    }
}
