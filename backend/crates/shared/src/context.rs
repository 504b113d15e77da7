//! Request Context
//!
//! Typed per-request carrier. The HTTP adapter fills it (request id from
//! `x-request-id`, user id once the access token is validated) and use
//! cases read it by field.

use crate::id::UserId;

/// Header holding the request id
pub const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub request_id: String,
    pub user_id: Option<UserId>,
}

impl RequestContext {
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            user_id: None,
        }
    }

    /// Context with a freshly generated request id
    pub fn generated() -> Self {
        Self::new(uuid::Uuid::new_v4().to_string())
    }

    pub fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

#[cfg(feature = "axum")]
mod extract {
    use std::convert::Infallible;

    use axum::extract::FromRequestParts;
    use http::request::Parts;

    use super::{REQUEST_ID_HEADER, RequestContext};

    /// Prefers a context already stored by the auth middleware, then the
    /// request id header, then a generated id.
    impl<S> FromRequestParts<S> for RequestContext
    where
        S: Send + Sync,
    {
        type Rejection = Infallible;

        async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
            if let Some(ctx) = parts.extensions.get::<RequestContext>() {
                return Ok(ctx.clone());
            }

            let ctx = parts
                .headers
                .get(REQUEST_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|v| !v.is_empty())
                .map(RequestContext::new)
                .unwrap_or_else(RequestContext::generated);

            Ok(ctx)
        }
    }
}
