//! Value Object Module

pub mod email;
pub mod refresh_secret;
