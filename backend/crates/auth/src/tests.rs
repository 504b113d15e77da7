use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use axum::middleware::from_fn_with_state;
use axum::response::Response;
use chrono::{Duration, Utc};
use kernel::context::RequestContext;
use kernel::id::DeviceId;
use platform::client::{DeviceDescriptor, DeviceType};
use platform::crypto::sha256_hex;
use platform::password::{
    Argon2Hasher, ClearTextPassword, HashedPassword, PasswordHashConfig, PasswordHashError,
    SecretHasher,
};
use tower::ServiceExt;

use crate::application::config::AuthConfig;
use crate::application::{LoginInput, LoginUseCase, LogoutInput, LogoutUseCase};
use crate::domain::entity::{device::Device, refresh_token::RefreshToken, user::User};
use crate::domain::repository::{CredentialStore, CredentialTx};
use crate::domain::value_object::email::Email;
use crate::domain::value_object::refresh_secret::RefreshSecret;
use crate::error::AuthError;
use crate::infra::memory::InMemoryAuthRepository;
use crate::presentation::handlers::AuthAppState;
use crate::presentation::middleware::require_access_token;
use crate::presentation::router::{account_router, auth_router};

const EMAIL: &str = "u@example.com";
const PASSWORD: &str = "Validpass1!";
const DEVICE_HEADER: &str =
    "os=Android; os_version=11; device_type=Mobile; browser=Chrome; browser_version=100.0";

fn hasher() -> Arc<dyn SecretHasher> {
    Arc::new(Argon2Hasher::new(PasswordHashConfig::minimal()).unwrap())
}

/// Counts `verify` calls on the wrapped hasher
struct CountingHasher {
    inner: Arc<dyn SecretHasher>,
    verifies: AtomicUsize,
}

impl SecretHasher for CountingHasher {
    fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        self.inner.hash(password)
    }

    fn verify(
        &self,
        password: &ClearTextPassword,
        stored: &HashedPassword,
    ) -> Result<(), PasswordHashError> {
        self.verifies.fetch_add(1, Ordering::SeqCst);
        self.inner.verify(password, stored)
    }

    fn dummy_hash(&self) -> &HashedPassword {
        self.inner.dummy_hash()
    }
}

fn android_chrome() -> DeviceDescriptor {
    DeviceDescriptor {
        device_type: DeviceType::Mobile,
        browser: "Chrome".to_string(),
        browser_version: "100.0".to_string(),
        os: "Android".to_string(),
        os_version: "11".to_string(),
    }
}

fn desktop_firefox() -> DeviceDescriptor {
    DeviceDescriptor {
        device_type: DeviceType::Desktop,
        browser: "Firefox".to_string(),
        browser_version: "120.0".to_string(),
        os: "Linux".to_string(),
        os_version: String::new(),
    }
}

fn device_header(d: &DeviceDescriptor) -> String {
    format!(
        "os={}; os_version={}; device_type={}; browser={}; browser_version={}",
        d.os,
        d.os_version,
        d.device_type.as_str(),
        d.browser,
        d.browser_version
    )
}

async fn seeded_repo(hasher: &Arc<dyn SecretHasher>) -> (InMemoryAuthRepository, User) {
    let repo = InMemoryAuthRepository::new();
    let password = ClearTextPassword::new(PASSWORD.to_string()).unwrap();
    let user = User::new(Email::new(EMAIL).unwrap(), hasher.hash(&password).unwrap());
    repo.insert_user(user.clone()).await;
    (repo, user)
}

/// Seed a device with one active refresh token
async fn seed_device(repo: &InMemoryAuthRepository, user: &User) -> (Device, RefreshToken) {
    let device = Device::new(user.user_id, android_chrome());
    let token = RefreshToken::issue(
        user.user_id,
        device.device_id,
        RefreshSecret::new("seeded".into()).hash(),
        Utc::now() - Duration::days(1),
        Duration::days(60),
    );
    repo.insert_device(device.clone()).await;
    repo.insert_refresh(token.clone()).await;
    (device, token)
}

fn login_input(password: &str, device_info: Option<&str>) -> LoginInput {
    LoginInput {
        email: EMAIL.to_string(),
        password: password.to_string(),
        device_info: device_info.map(str::to_string),
        user_agent: None,
    }
}

fn login_use_case(repo: &InMemoryAuthRepository, hasher: Arc<dyn SecretHasher>) -> LoginUseCase<InMemoryAuthRepository> {
    let config = AuthConfig::development().unwrap();
    LoginUseCase::new(
        Arc::new(repo.clone()),
        hasher,
        Arc::new(config.token_minter()),
        Arc::new(config),
    )
}

fn app(repo: InMemoryAuthRepository, hasher: Arc<dyn SecretHasher>) -> Router {
    let state = AuthAppState::new(repo, AuthConfig::development().unwrap(), hasher);
    let protected = account_router(state.clone())
        .layer(from_fn_with_state(state.access_state(), require_access_token));

    Router::new()
        .merge(auth_router(state))
        .nest("/app", protected)
}

fn post_json(uri: &str, body: &str, device_info: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(value) = device_info {
        builder = builder.header("x-device-info", value);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn login_body(password: &str) -> String {
    serde_json::json!({ "email": EMAIL, "password": password }).to_string()
}

async fn body_json(response: Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn set_cookie(response: &Response) -> String {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

mod login_tests {
    use super::*;

    #[tokio::test]
    async fn test_rotation_failure_leaves_no_trace_on_known_device() {
        let hasher = hasher();
        let (repo, user) = seeded_repo(&hasher).await;
        let (_, seeded) = seed_device(&repo, &user).await;
        repo.fail_next_refresh_insert();

        let result = login_use_case(&repo, hasher)
            .execute(&RequestContext::new("req"), login_input(PASSWORD, Some(DEVICE_HEADER)))
            .await;
        assert!(matches!(result, Err(AuthError::Internal(_))));

        let tokens = repo.refresh_tokens().await;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].refresh_id, seeded.refresh_id);
        assert!(tokens[0].revoked_at.is_none());
        assert_eq!(repo.devices().await.len(), 1);
    }

    #[tokio::test]
    async fn test_rotation_failure_leaves_no_trace_on_new_device() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;
        repo.fail_next_refresh_insert();

        let result = login_use_case(&repo, hasher)
            .execute(&RequestContext::new("req"), login_input(PASSWORD, Some(DEVICE_HEADER)))
            .await;
        assert!(result.is_err());
        assert!(repo.devices().await.is_empty());
        assert!(repo.refresh_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_one_active_token_per_device() {
        let hasher = hasher();
        let (repo, user) = seeded_repo(&hasher).await;
        let use_case = login_use_case(&repo, hasher);
        let ctx = RequestContext::new("req");
        let firefox = device_header(&desktop_firefox());

        for _ in 0..3 {
            use_case
                .execute(&ctx, login_input(PASSWORD, Some(DEVICE_HEADER)))
                .await
                .unwrap();
        }
        use_case
            .execute(&ctx, login_input(PASSWORD, Some(&firefox)))
            .await
            .unwrap();

        let devices = repo.devices().await;
        assert_eq!(devices.len(), 2);

        let tokens = repo.refresh_tokens().await;
        assert_eq!(tokens.len(), 4);
        for device in &devices {
            let active = tokens
                .iter()
                .filter(|t| t.device_id == device.device_id && t.user_id == user.user_id)
                .filter(|t| t.is_active(Utc::now()))
                .count();
            assert_eq!(active, 1);
        }
    }

    #[tokio::test]
    async fn test_refresh_secret_never_stored() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;

        let output = login_use_case(&repo, hasher)
            .execute(&RequestContext::new("req"), login_input(PASSWORD, Some(DEVICE_HEADER)))
            .await
            .unwrap();

        let secret = output.refresh_secret.expose().to_string();
        assert_eq!(secret.len(), 64);

        let tokens = repo.refresh_tokens().await;
        assert_eq!(tokens.len(), 1);
        assert_ne!(tokens[0].token_hash.as_str(), secret);
        assert_eq!(tokens[0].token_hash.as_str(), sha256_hex(secret.as_bytes()));
    }

    #[tokio::test]
    async fn test_refresh_expires_after_sixty_days() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;

        login_use_case(&repo, hasher)
            .execute(&RequestContext::new("req"), login_input(PASSWORD, Some(DEVICE_HEADER)))
            .await
            .unwrap();

        let token = &repo.refresh_tokens().await[0];
        assert_eq!(token.expires_at - token.created_at, Duration::days(60));
    }

    #[tokio::test]
    async fn test_failures_are_classified() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;
        let use_case = login_use_case(&repo, hasher);
        let ctx = RequestContext::new("req");

        let mut bad_email = login_input(PASSWORD, Some(DEVICE_HEADER));
        bad_email.email = "not-an-email".into();
        assert!(matches!(
            use_case.execute(&ctx, bad_email).await,
            Err(AuthError::InvalidEmail)
        ));

        let mut unknown = login_input(PASSWORD, Some(DEVICE_HEADER));
        unknown.email = "other@example.com".into();
        assert!(matches!(
            use_case.execute(&ctx, unknown).await,
            Err(AuthError::InvalidCredentials)
        ));

        assert!(matches!(
            use_case
                .execute(&ctx, login_input("Invalidpass1!", Some(DEVICE_HEADER)))
                .await,
            Err(AuthError::InvalidCredentials)
        ));

        assert!(matches!(
            use_case.execute(&ctx, login_input(PASSWORD, None)).await,
            Err(AuthError::InvalidDeviceInfo)
        ));
    }

    #[tokio::test]
    async fn test_user_agent_fallback() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;

        let mut input = login_input(PASSWORD, Some("device_type=Tablet"));
        input.user_agent = Some(
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                .to_string(),
        );

        login_use_case(&repo, hasher)
            .execute(&RequestContext::new("req"), input)
            .await
            .unwrap();

        let devices = repo.devices().await;
        assert_eq!(devices.len(), 1);
        assert_eq!(devices[0].descriptor.device_type, DeviceType::Desktop);
        assert_eq!(devices[0].descriptor.browser, "Chrome");
    }

    #[tokio::test]
    async fn test_unknown_email_costs_one_verification() {
        let counting = Arc::new(CountingHasher {
            inner: hasher(),
            verifies: AtomicUsize::new(0),
        });
        let hasher: Arc<dyn SecretHasher> = counting.clone();
        let (repo, _) = seeded_repo(&hasher).await;
        let use_case = login_use_case(&repo, hasher);
        let ctx = RequestContext::new("req");

        let mut unknown = login_input(PASSWORD, Some(DEVICE_HEADER));
        unknown.email = "nobody@example.com".into();
        assert!(matches!(
            use_case.execute(&ctx, unknown).await,
            Err(AuthError::InvalidCredentials)
        ));
        let unknown_user = counting.verifies.swap(0, Ordering::SeqCst);

        assert!(matches!(
            use_case
                .execute(&ctx, login_input("Invalidpass1!", Some(DEVICE_HEADER)))
                .await,
            Err(AuthError::InvalidCredentials)
        ));
        let bad_password = counting.verifies.load(Ordering::SeqCst);

        assert_eq!(unknown_user, 1);
        assert_eq!(unknown_user, bad_password);
    }
}

mod credential_store_tests {
    use super::*;

    #[tokio::test]
    async fn test_active_refresh_follows_login_and_logout() {
        let hasher = hasher();
        let (repo, user) = seeded_repo(&hasher).await;
        let use_case = login_use_case(&repo, hasher);
        let ctx = RequestContext::new("req");

        assert!(
            repo.find_active_refresh(&user.user_id, &DeviceId::new())
                .await
                .unwrap()
                .is_none()
        );

        let first = use_case
            .execute(&ctx, login_input(PASSWORD, Some(DEVICE_HEADER)))
            .await
            .unwrap();
        let device = repo
            .find_device(&user.user_id, &android_chrome())
            .await
            .unwrap()
            .unwrap();
        let active = repo
            .find_active_refresh(&user.user_id, &device.device_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.token_hash, first.refresh_secret.hash());

        let second = use_case
            .execute(&ctx, login_input(PASSWORD, Some(DEVICE_HEADER)))
            .await
            .unwrap();
        let active = repo
            .find_active_refresh(&user.user_id, &device.device_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(active.token_hash, second.refresh_secret.hash());
        assert_ne!(active.token_hash, first.refresh_secret.hash());

        let revoked = LogoutUseCase::new(Arc::new(repo.clone()))
            .execute(
                &ctx,
                &user.user_id,
                LogoutInput {
                    device_info: Some(DEVICE_HEADER.to_string()),
                    user_agent: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(revoked, 1);
        assert!(
            repo.find_active_refresh(&user.user_id, &device.device_id)
                .await
                .unwrap()
                .is_none()
        );
    }

    fn issue(user: &User, device: &Device, secret: &str) -> RefreshToken {
        RefreshToken::issue(
            user.user_id,
            device.device_id,
            RefreshSecret::new(secret.into()).hash(),
            Utc::now(),
            Duration::days(60),
        )
    }

    #[tokio::test]
    async fn test_racing_first_logins_commit_once() {
        let hasher = hasher();
        let (repo, user) = seeded_repo(&hasher).await;

        let mut a = repo.begin().await.unwrap();
        let mut b = repo.begin().await.unwrap();
        for (tx, secret) in [(&mut a, "a"), (&mut b, "b")] {
            assert!(tx.find_device(&user.user_id, &android_chrome()).await.unwrap().is_none());
            let device = Device::new(user.user_id, android_chrome());
            tx.create_device(&device).await.unwrap();
            tx.create_refresh(&issue(&user, &device, secret)).await.unwrap();
        }

        a.commit().await.unwrap();
        assert!(matches!(b.commit().await, Err(AuthError::Internal(_))));

        assert_eq!(repo.devices().await.len(), 1);
        let tokens = repo.refresh_tokens().await;
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].token_hash, RefreshSecret::new("a".into()).hash());
    }

    #[tokio::test]
    async fn test_racing_rotations_keep_one_active_token() {
        let hasher = hasher();
        let (repo, user) = seeded_repo(&hasher).await;
        let (device, _) = seed_device(&repo, &user).await;

        let mut a = repo.begin().await.unwrap();
        let mut b = repo.begin().await.unwrap();
        for (tx, secret) in [(&mut a, "a"), (&mut b, "b")] {
            tx.revoke_refresh(&user.user_id, &device.device_id, Utc::now())
                .await
                .unwrap();
            tx.create_refresh(&issue(&user, &device, secret)).await.unwrap();
        }
        a.commit().await.unwrap();
        b.commit().await.unwrap();

        let active = repo
            .refresh_tokens()
            .await
            .into_iter()
            .filter(|t| t.is_active(Utc::now()))
            .count();
        assert_eq!(active, 1);
    }
}

mod router_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_new_device() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;

        let response = app(repo.clone(), hasher)
            .oneshot(post_json("/login", &login_body(PASSWORD), Some(DEVICE_HEADER)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = set_cookie(&response);
        let value = cookie
            .strip_prefix("refresh_token=")
            .and_then(|rest| rest.split(';').next())
            .unwrap_or_default();
        assert_eq!(value.len(), 64);
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("SameSite=Strict"));

        let body = body_json(response).await;
        assert_eq!(body["data"]["message"], "login successful");
        assert!(!body["data"]["token"].as_str().unwrap().is_empty());

        assert_eq!(repo.devices().await.len(), 1);
        assert_eq!(repo.refresh_tokens().await.len(), 1);
    }

    #[tokio::test]
    async fn test_login_existing_device_rotates_refresh() {
        let hasher = hasher();
        let (repo, user) = seeded_repo(&hasher).await;
        let (_, seeded) = seed_device(&repo, &user).await;

        let response = app(repo.clone(), hasher)
            .oneshot(post_json("/login", &login_body(PASSWORD), Some(DEVICE_HEADER)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let tokens = repo.refresh_tokens().await;
        assert_eq!(tokens.len(), 2);

        let prior = tokens
            .iter()
            .find(|t| t.refresh_id == seeded.refresh_id)
            .unwrap();
        assert!(prior.revoked_at.is_some());

        let fresh = tokens
            .iter()
            .find(|t| t.refresh_id != seeded.refresh_id)
            .unwrap();
        assert!(fresh.revoked_at.is_none());
        assert_eq!(fresh.device_id, seeded.device_id);
        assert_eq!(repo.devices().await.len(), 1);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;

        let response = app(repo.clone(), hasher)
            .oneshot(post_json("/login", &login_body("Invalidpass1!"), Some(DEVICE_HEADER)))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(set_cookie(&response).is_empty());
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "data": { "error": "login failed" } })
        );
        assert!(repo.devices().await.is_empty());
        assert!(repo.refresh_tokens().await.is_empty());
    }

    #[tokio::test]
    async fn test_login_malformed_json() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;

        let response = app(repo, hasher)
            .oneshot(post_json(
                "/login",
                r#"{"email":"u@example.com","password":"Validpass1!""#,
                Some(DEVICE_HEADER),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "data": { "error": "invalid request body" } })
        );
    }

    #[tokio::test]
    async fn test_login_collapses_email_and_device_errors() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;
        let app = app(repo, hasher);

        let bad_email = serde_json::json!({ "email": "nope", "password": PASSWORD }).to_string();
        let response = app
            .clone()
            .oneshot(post_json("/login", &bad_email, Some(DEVICE_HEADER)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["data"]["error"], "login failed");

        let response = app
            .oneshot(post_json("/login", &login_body(PASSWORD), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["data"]["error"], "login failed");
    }

    #[tokio::test]
    async fn test_signup_then_login() {
        let hasher = hasher();
        let repo = InMemoryAuthRepository::new();
        let app = app(repo, hasher);
        let body = serde_json::json!({ "email": "new@example.com", "password": PASSWORD }).to_string();

        let response = app
            .clone()
            .oneshot(post_json("/signup", &body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["data"]["message"], "signup successful");
        assert!(json["data"]["user_id"].as_str().unwrap().parse::<uuid::Uuid>().is_ok());

        let response = app
            .clone()
            .oneshot(post_json("/signup", &body, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .oneshot(post_json("/login", &body, Some(DEVICE_HEADER)))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_validation() {
        let hasher = hasher();
        let app = app(InMemoryAuthRepository::new(), hasher);

        let bad_email = serde_json::json!({ "email": "nope", "password": PASSWORD }).to_string();
        let response = app
            .clone()
            .oneshot(post_json("/signup", &bad_email, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["data"]["error"], "invalid email");

        let weak = serde_json::json!({ "email": "a@example.com", "password": "12345678" }).to_string();
        let response = app
            .oneshot(post_json("/signup", &weak, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["data"]["error"],
            "password does not meet requirements"
        );
    }

    #[tokio::test]
    async fn test_logout_revokes_calling_device_only() {
        let hasher = hasher();
        let (repo, _) = seeded_repo(&hasher).await;
        let app = app(repo.clone(), hasher);
        let firefox = device_header(&desktop_firefox());

        let response = app
            .clone()
            .oneshot(post_json("/login", &login_body(PASSWORD), Some(DEVICE_HEADER)))
            .await
            .unwrap();
        let token = body_json(response).await["data"]["token"]
            .as_str()
            .unwrap()
            .to_string();
        app.clone()
            .oneshot(post_json("/login", &login_body(PASSWORD), Some(&firefox)))
            .await
            .unwrap();

        let request = Request::builder()
            .method("POST")
            .uri("/app/logout")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .header("x-device-info", DEVICE_HEADER)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(set_cookie(&response).contains("Max-Age=0"));
        assert_eq!(body_json(response).await["data"]["message"], "logout successful");

        let now = Utc::now();
        let tokens = repo.refresh_tokens().await;
        assert_eq!(tokens.iter().filter(|t| t.is_active(now)).count(), 1);

        let devices = repo.devices().await;
        let firefox_device = devices
            .iter()
            .find(|d| d.descriptor == desktop_firefox())
            .unwrap();
        assert!(
            tokens
                .iter()
                .any(|t| t.device_id == firefox_device.device_id && t.is_active(now))
        );
    }

    #[tokio::test]
    async fn test_protected_route_requires_token() {
        let hasher = hasher();
        let app = app(InMemoryAuthRepository::new(), hasher);

        let missing = Request::builder()
            .method("POST")
            .uri("/app/logout")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(missing).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await,
            serde_json::json!({ "data": { "error": "unauthorized" } })
        );

        let garbage = Request::builder()
            .method("POST")
            .uri("/app/logout")
            .header(header::AUTHORIZATION, "Bearer not.a.jwt")
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(garbage).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
