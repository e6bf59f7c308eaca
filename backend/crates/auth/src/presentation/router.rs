//! Auth Router

use std::sync::Arc;

use axum::{Router, middleware::from_fn_with_state, routing::post};
use platform::rate_limit::{RateLimiter, rate_limit};

use crate::application::token::TokenService;
use crate::domain::repository::AdminUserRepository;
use crate::infra::postgres::PgAdminUserRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Create the Auth router with PostgreSQL repository
pub fn auth_router(
    repo: PgAdminUserRepository,
    tokens: TokenService,
    login_limiter: RateLimiter,
) -> Router {
    auth_router_generic(repo, tokens, login_limiter)
}

/// Create a generic Auth router for any repository implementation
pub fn auth_router_generic<R>(repo: R, tokens: TokenService, login_limiter: RateLimiter) -> Router
where
    R: AdminUserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo: Arc::new(repo),
        tokens,
    };

    Router::new()
        .route(
            "/login",
            post(handlers::login::<R>).layer(from_fn_with_state(login_limiter, rate_limit)),
        )
        .with_state(state)
}
