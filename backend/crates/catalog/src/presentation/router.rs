//! Catalog Router

use std::sync::Arc;

use auth::TokenService;
use axum::{
    Router,
    routing::{get, patch},
};

use crate::application::ActiveServicesCache;
use crate::domain::repository::ServiceRepository;
use crate::infra::postgres::PgServiceRepository;
use crate::presentation::handlers::{self, CatalogAppState};

/// Create the Catalog router with PostgreSQL repository
pub fn catalog_router(
    repo: PgServiceRepository,
    cache: Arc<ActiveServicesCache>,
    tokens: TokenService,
) -> Router {
    catalog_router_generic(repo, cache, tokens)
}

/// Create a generic Catalog router for any repository implementation
pub fn catalog_router_generic<R>(
    repo: R,
    cache: Arc<ActiveServicesCache>,
    tokens: TokenService,
) -> Router
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let state = CatalogAppState {
        repo: Arc::new(repo),
        cache,
        tokens,
    };

    // `/reorder` and `/admin` are registered as literal segments, which
    // take priority over `/{id}`.
    Router::new()
        .route(
            "/",
            get(handlers::list_active::<R>).post(handlers::create::<R>),
        )
        .route("/admin", get(handlers::list_admin::<R>))
        .route("/reorder", patch(handlers::reorder::<R>))
        .route(
            "/{id}",
            patch(handlers::update::<R>).delete(handlers::delete::<R>),
        )
        .with_state(state)
}
