//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases (login, sign-up, logout)
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, router, access-token middleware
//!
//! ## Security Model
//! - Passwords hashed with Argon2id; unknown user and wrong password are
//!   indistinguishable to clients
//! - Short-lived HS256 access tokens (15 minutes)
//! - Long-lived refresh secrets bound to a device, stored only as SHA-256
//! - Refresh rotation (revoke previous + insert new) runs in one database
//!   transaction

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::handlers::AuthAppState;
pub use presentation::middleware::{AccessTokenState, require_access_token};
pub use presentation::router::{account_router, auth_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

#[cfg(test)]
mod tests;
