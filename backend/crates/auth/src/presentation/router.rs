//! Auth Router

use axum::{Router, routing::post};

use crate::domain::repository::{CredentialStore, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};

/// Public routes: `/signup`, `/login`
pub fn auth_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/signup", post(handlers::sign_up::<R>))
        .route("/login", post(handlers::login::<R>))
        .with_state(state)
}

/// Authenticated account routes, nested under `/app` behind
/// `require_access_token`
pub fn account_router<R>(state: AuthAppState<R>) -> Router
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    Router::new()
        .route("/logout", post(handlers::logout::<R>))
        .with_state(state)
}
