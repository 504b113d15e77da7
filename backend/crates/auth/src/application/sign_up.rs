//! Sign Up Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::context::RequestContext;
use kernel::id::UserId;
use platform::password::{ClearTextPassword, SecretHasher, hash_blocking};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    hasher: Arc<dyn SecretHasher>,
}

impl<U> SignUpUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, hasher: Arc<dyn SecretHasher>) -> Self {
        Self { user_repo, hasher }
    }

    pub async fn execute(&self, ctx: &RequestContext, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidEmail)?;

        // Validate password before touching the store
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::PasswordPolicy(e.to_string()))?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = hash_blocking(Arc::clone(&self.hasher), password).await?;

        let user = User::new(email, password_hash);
        self.user_repo.create(&user).await?;

        tracing::info!(
            request_id = %ctx.request_id,
            user_id = %user.user_id,
            "User signed up"
        );

        Ok(SignUpOutput {
            user_id: user.user_id,
        })
    }
}
