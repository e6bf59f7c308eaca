//! Login Use Case
//!
//! Verifies operator credentials and issues a bearer token.

use std::sync::Arc;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::application::token::TokenService;
use crate::domain::entity::AdminUser;
use crate::domain::repository::AdminUserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
pub struct LoginOutput {
    pub access_token: String,
    pub user: AdminUser,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: AdminUserRepository,
{
    repo: Arc<R>,
    tokens: TokenService,
}

impl<R> LoginUseCase<R>
where
    R: AdminUserRepository,
{
    pub fn new(repo: Arc<R>, tokens: TokenService) -> Self {
        Self { repo, tokens }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let user = self
            .repo
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let stored = user.password_hash.clone();
        let password = ClearTextPassword::for_verification(input.password);
        let user_id = user.id;

        // Hash verification is CPU bound
        let valid = tokio::task::spawn_blocking(move || match HashedPassword::from_stored(stored) {
            Ok(hash) => hash.verify(&password),
            Err(e) => {
                tracing::warn!(admin_id = %user_id, error = %e, "Stored password hash is not recognized");
                false
            }
        })
        .await
        .map_err(|e| AuthError::Internal(format!("password verification task failed: {e}")))?;

        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(&user.principal())?;
        tracing::info!(admin_id = %user.id, "Admin logged in");

        Ok(LoginOutput { access_token, user })
    }
}
