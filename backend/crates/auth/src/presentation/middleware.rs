//! Access Token Middleware
//!
//! Guards `/app/*`: validates the bearer token and stores the caller's
//! `RequestContext` in request extensions for handlers to extract.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::context::{REQUEST_ID_HEADER, RequestContext};
use kernel::id::UserId;
use platform::token::TokenMinter;
use std::sync::Arc;

use crate::error::AuthError;

/// Middleware state
#[derive(Clone)]
pub struct AccessTokenState {
    pub minter: Arc<TokenMinter>,
}

/// Reject requests without a valid `Authorization: Bearer <jwt>`
pub async fn require_access_token(
    State(state): State<AccessTokenState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let Some(token) = bearer_token(&req) else {
        return AuthError::Unauthenticated.into_response();
    };

    let user_id = match state
        .minter
        .validate_access(token)
        .and_then(|claims| claims.subject())
    {
        Ok(subject) => UserId::from_uuid(subject),
        Err(e) => {
            tracing::debug!(error = %e, "Access token rejected");
            return AuthError::Unauthenticated.into_response();
        }
    };

    let ctx = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(RequestContext::new)
        .unwrap_or_else(RequestContext::generated)
        .with_user(user_id);

    req.extensions_mut().insert(ctx);

    next.run(req).await
}

fn bearer_token(req: &Request<Body>) -> Option<&str> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
