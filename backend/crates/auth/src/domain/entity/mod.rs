//! Entity Module

pub mod device;
pub mod refresh_token;
pub mod user;

pub use device::Device;
pub use refresh_token::RefreshToken;
pub use user::User;
