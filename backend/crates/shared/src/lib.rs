//! Shared Kernel
//!
//! Vocabulary shared by every backend crate:
//! - Unified error type, error kinds and the response envelope
//! - Typed entity ids
//! - The per-request context carried from the HTTP edge into use cases
//!
//! Only things with one meaning across all domains live here.

pub mod context;
pub mod envelope;
pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
