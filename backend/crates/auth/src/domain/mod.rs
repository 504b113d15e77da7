//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{device::Device, refresh_token::RefreshToken, user::User};
pub use repository::{CredentialStore, CredentialTx, UserRepository};
