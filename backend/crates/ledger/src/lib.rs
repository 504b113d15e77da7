//! Ledger Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, cursor signing, repository traits
//! - `application/` - Use cases
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers
//!
//! ## Money and Ordering
//! - Amounts cross the wire as decimal dollars and are stored as `i64`
//!   cents; conversion rounds half away from zero
//! - Listing is keyset-paginated by (date DESC, id DESC); the continuation
//!   cursor is HMAC-signed so clients cannot forge positions

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::LedgerConfig;
pub use domain::services::{Cursor, CursorError, CursorSigner};
pub use error::{LedgerError, LedgerResult};
pub use infra::memory::InMemoryLedgerRepository;
pub use infra::postgres::PgLedgerRepository;
pub use presentation::handlers::LedgerAppState;
pub use presentation::router::ledger_router;

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}
