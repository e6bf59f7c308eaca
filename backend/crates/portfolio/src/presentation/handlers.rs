//! HTTP Handlers

use std::sync::Arc;

use auth::{Principal, TokenService};
use axum::Json;
use axum::extract::{FromRef, State};
use kernel::extract::{IdPath, ValidQuery};
use kernel::id::markers;
use kernel::pagination::Page;
use platform::storage::ObjectStorage;

use crate::application::{
    ActivePortfolioCache, CreatePortfolioItemUseCase, DeletePortfolioItemUseCase,
    ListActivePortfolioUseCase, ListPortfolioUseCase, PORTFOLIO_PAGE_DEFAULTS,
    UpdatePortfolioItemUseCase,
};
use crate::domain::entity::{ActivePortfolioItem, PortfolioEntry, PortfolioFilter};
use crate::domain::repository::PortfolioRepository;
use crate::error::PortfolioResult;
use crate::presentation::dto::{
    CreatePortfolioRequest, PortfolioListQuery, SuccessResponse, UpdatePortfolioRequest,
};
use crate::presentation::form::PortfolioForm;

/// Shared state for portfolio handlers
pub struct PortfolioAppState<R, S>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub storage: Arc<S>,
    pub cache: Arc<ActivePortfolioCache>,
    pub tokens: TokenService,
}

impl<R, S> Clone for PortfolioAppState<R, S>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            storage: Arc::clone(&self.storage),
            cache: Arc::clone(&self.cache),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R, S> FromRef<PortfolioAppState<R, S>> for TokenService
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    fn from_ref(state: &PortfolioAppState<R, S>) -> Self {
        state.tokens.clone()
    }
}

/// GET /portfolio
pub async fn list_active<R, S>(
    State(state): State<PortfolioAppState<R, S>>,
) -> PortfolioResult<Json<Vec<ActivePortfolioItem>>>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    let use_case = ListActivePortfolioUseCase::new(state.repo.clone(), state.cache.clone());
    let items = use_case.execute().await?;
    Ok(Json(items.as_ref().clone()))
}

/// GET /portfolio/admin
pub async fn list_admin<R, S>(
    _principal: Principal,
    State(state): State<PortfolioAppState<R, S>>,
    ValidQuery(query): ValidQuery<PortfolioListQuery>,
) -> PortfolioResult<Json<Page<PortfolioEntry>>>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    let filter = PortfolioFilter {
        activo: query.activo,
        service_id: query.service_id,
        search: query.search.filter(|s| !s.is_empty()),
    };
    let page = query.page.resolve(PORTFOLIO_PAGE_DEFAULTS);

    let use_case = ListPortfolioUseCase::new(state.repo.clone());
    Ok(Json(use_case.execute(filter, page).await?))
}

/// POST /portfolio
pub async fn create<R, S>(
    _principal: Principal,
    State(state): State<PortfolioAppState<R, S>>,
    form: PortfolioForm<CreatePortfolioRequest>,
) -> PortfolioResult<Json<SuccessResponse>>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    let use_case = CreatePortfolioItemUseCase::new(
        state.repo.clone(),
        state.storage.clone(),
        state.cache.clone(),
    );
    use_case.execute(form.fields.into(), form.foto).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PATCH /portfolio/{id}
pub async fn update<R, S>(
    _principal: Principal,
    State(state): State<PortfolioAppState<R, S>>,
    IdPath(id): IdPath<markers::PortfolioItem>,
    form: PortfolioForm<UpdatePortfolioRequest>,
) -> PortfolioResult<Json<SuccessResponse>>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    let use_case = UpdatePortfolioItemUseCase::new(
        state.repo.clone(),
        state.storage.clone(),
        state.cache.clone(),
    );
    use_case.execute(id, form.fields.into(), form.foto).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /portfolio/{id}
pub async fn delete<R, S>(
    _principal: Principal,
    State(state): State<PortfolioAppState<R, S>>,
    IdPath(id): IdPath<markers::PortfolioItem>,
) -> PortfolioResult<Json<SuccessResponse>>
where
    R: PortfolioRepository + Send + Sync + 'static,
    S: ObjectStorage + Send + Sync + 'static,
{
    let use_case = DeletePortfolioItemUseCase::new(
        state.repo.clone(),
        state.storage.clone(),
        state.cache.clone(),
    );
    use_case.execute(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
