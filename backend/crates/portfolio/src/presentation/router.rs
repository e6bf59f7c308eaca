//! Portfolio Router

use std::sync::Arc;

use auth::TokenService;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, patch},
};
use platform::storage::{ObjectStorage, SupabaseStorage};

use crate::application::ActivePortfolioCache;
use crate::domain::repository::PortfolioRepository;
use crate::infra::postgres::PgPortfolioRepository;
use crate::presentation::form::FORM_BODY_LIMIT;
use crate::presentation::handlers::{self, PortfolioAppState};

/// Create the Portfolio router with PostgreSQL and Supabase Storage
pub fn portfolio_router(
    repo: PgPortfolioRepository,
    storage: SupabaseStorage,
    cache: Arc<ActivePortfolioCache>,
    tokens: TokenService,
) -> Router {
    portfolio_router_generic(repo, storage, cache, tokens)
}

/// Create a generic Portfolio router for any repository and storage
pub fn portfolio_router_generic<R, S>(
    repo: R,
    storage: S,
    cache: Arc<ActivePortfolioCache>,
    tokens: TokenService,
) -> Router
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    let state = PortfolioAppState {
        repo: Arc::new(repo),
        storage: Arc::new(storage),
        cache,
        tokens,
    };

    Router::new()
        .route(
            "/",
            get(handlers::list_active::<R, S>).post(handlers::create::<R, S>),
        )
        .route("/admin", get(handlers::list_admin::<R, S>))
        .route(
            "/{id}",
            patch(handlers::update::<R, S>).delete(handlers::delete::<R, S>),
        )
        .layer(DefaultBodyLimit::max(FORM_BODY_LIMIT))
        .with_state(state)
}
