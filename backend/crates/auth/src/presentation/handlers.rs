//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::context::RequestContext;
use kernel::envelope::Envelope;
use platform::client::DEVICE_INFO_HEADER;
use platform::password::SecretHasher;
use platform::token::TokenMinter;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutInput, LogoutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{CredentialStore, UserRepository};
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{LoginRequest, LoginResponse, MessageResponse, SignUpRequest, SignUpResponse};
use crate::presentation::middleware::AccessTokenState;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub hasher: Arc<dyn SecretHasher>,
    pub minter: Arc<TokenMinter>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig, hasher: Arc<dyn SecretHasher>) -> Self {
        let minter = Arc::new(config.token_minter());
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            hasher,
            minter,
        }
    }

    /// State for the access-token middleware (same minter)
    pub fn access_state(&self) -> AccessTokenState {
        AccessTokenState {
            minter: Arc::clone(&self.minter),
        }
    }
}

fn header_string(headers: &HeaderMap, name: impl header::AsHeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /signup
pub async fn sign_up<R>(
    State(state): State<AuthAppState<R>>,
    ctx: RequestContext,
    payload: Result<Json<SignUpRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = SignUpUseCase::new(state.repo.clone(), state.hasher.clone());

    let input = SignUpInput {
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(&ctx, input).await?;

    Ok((
        StatusCode::CREATED,
        Envelope::ok(SignUpResponse {
            message: "signup successful".to_string(),
            user_id: output.user_id.into_uuid(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    ctx: RequestContext,
    headers: HeaderMap,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    let Json(req) = payload?;

    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.hasher.clone(),
        state.minter.clone(),
        state.config.clone(),
    );

    let input = LoginInput {
        email: req.email,
        password: req.password,
        device_info: header_string(&headers, DEVICE_INFO_HEADER),
        user_agent: header_string(&headers, header::USER_AGENT),
    };

    let output = use_case
        .execute(&ctx, input)
        .await
        .map_err(AuthError::into_login_failure)?;

    let cookie = state
        .config
        .refresh_cookie()
        .set_cookie_header(output.refresh_secret.expose())
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Envelope::ok(LoginResponse {
            message: "login successful".to_string(),
            token: output.access_token,
        }),
    )
        .into_response())
}

// ============================================================================
// Logout
// ============================================================================

/// POST /app/logout (behind the access-token middleware)
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    ctx: RequestContext,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    R: UserRepository + CredentialStore + Clone + Send + Sync + 'static,
{
    let user_id = ctx.user_id.ok_or(AuthError::Unauthenticated)?;

    let use_case = LogoutUseCase::new(state.repo.clone());

    let input = LogoutInput {
        device_info: header_string(&headers, DEVICE_INFO_HEADER),
        user_agent: header_string(&headers, header::USER_AGENT),
    };

    use_case.execute(&ctx, &user_id, input).await?;

    let cookie = state
        .config
        .refresh_cookie()
        .delete_cookie_header()
        .map_err(|e| AuthError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [(header::SET_COOKIE, cookie)],
        Envelope::ok(MessageResponse {
            message: "logout successful".to_string(),
        }),
    )
        .into_response())
}
