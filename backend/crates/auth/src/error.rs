//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::PasswordHashError;
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email failed format validation
    #[error("Invalid email")]
    InvalidEmail,

    /// Unknown user or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Neither device header nor user agent produced a descriptor
    #[error("Invalid device info")]
    InvalidDeviceInfo,

    /// Collapsed login failure shown to clients
    #[error("Login failed")]
    LoginFailed,

    /// Body missing or not valid JSON for the endpoint
    #[error("Invalid request body")]
    InvalidRequestBody,

    /// Email already registered
    #[error("Email already registered")]
    EmailTaken,

    /// Password policy violation (sign-up only)
    #[error("Password validation failed: {0}")]
    PasswordPolicy(String),

    /// Missing or invalid access token
    #[error("Unauthenticated")]
    Unauthenticated,

    /// Token minting failed
    #[error("Token error: {0}")]
    Token(#[from] TokenError),

    /// Hashing backend failed (not a mismatch)
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Login hides which step failed: validation failures become
    /// `LoginFailed`, everything else stays a server error.
    pub fn into_login_failure(self) -> Self {
        match self {
            AuthError::InvalidEmail
            | AuthError::InvalidCredentials
            | AuthError::InvalidDeviceInfo => AuthError::LoginFailed,
            other => other,
        }
    }

    /// Message rendered in the response envelope
    pub fn public_message(&self) -> &'static str {
        match self {
            AuthError::InvalidEmail => "invalid email",
            AuthError::InvalidCredentials | AuthError::LoginFailed => "login failed",
            AuthError::InvalidDeviceInfo => "invalid device info",
            AuthError::InvalidRequestBody => "invalid request body",
            AuthError::EmailTaken => "email already registered",
            AuthError::PasswordPolicy(_) => "password does not meet requirements",
            AuthError::Unauthenticated => "unauthorized",
            AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => "internal server error",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidEmail
            | AuthError::InvalidDeviceInfo
            | AuthError::InvalidRequestBody
            | AuthError::PasswordPolicy(_) => StatusCode::BAD_REQUEST,
            AuthError::InvalidCredentials | AuthError::LoginFailed | AuthError::Unauthenticated => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidEmail
            | AuthError::InvalidDeviceInfo
            | AuthError::InvalidRequestBody
            | AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::InvalidCredentials | AuthError::LoginFailed | AuthError::Unauthenticated => {
                ErrorKind::Unauthorized
            }
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::Token(_)
            | AuthError::PasswordHash(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; the original error is kept as its source
    pub fn into_app_error(self) -> AppError {
        AppError::new(self.kind(), self.public_message()).with_source(self)
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Auth token error");
            }
            AuthError::PasswordHash(e) => {
                tracing::error!(error = %e, "Auth password hash error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(error = %rejection, "Rejected request body");
        AuthError::InvalidRequestBody
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_failures_collapse() {
        for err in [
            AuthError::InvalidEmail,
            AuthError::InvalidCredentials,
            AuthError::InvalidDeviceInfo,
        ] {
            let collapsed = err.into_login_failure();
            assert_eq!(collapsed.status_code(), StatusCode::UNAUTHORIZED);
            assert_eq!(collapsed.public_message(), "login failed");
        }
    }

    #[test]
    fn test_server_errors_stay_server_errors() {
        let err = AuthError::Internal("boom".into()).into_login_failure();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.public_message(), "internal server error");
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let app = AuthError::Internal("secret detail".into()).into_app_error();
        assert_eq!(app.message(), "internal server error");
    }
}
