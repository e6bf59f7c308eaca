//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, State};
use kernel::extract::Valid;

use crate::application::token::TokenService;
use crate::application::{LoginInput, LoginUseCase};
use crate::domain::repository::AdminUserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{LoginRequest, LoginResponse};

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: AdminUserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: TokenService,
}

impl<R> Clone for AuthAppState<R>
where
    R: AdminUserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R> FromRef<AuthAppState<R>> for TokenService
where
    R: AdminUserRepository + Send + Sync + 'static,
{
    fn from_ref(state: &AuthAppState<R>) -> Self {
        state.tokens.clone()
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Valid(req): Valid<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AdminUserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        access_token: output.access_token,
        user: output.user.into(),
    }))
}
