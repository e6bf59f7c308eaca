//! HTTP Handlers

use std::sync::Arc;

use auth::{Principal, TokenService};
use axum::Json;
use axum::extract::{FromRef, State};
use kernel::extract::{IdPath, Valid, ValidList, ValidQuery};
use kernel::id::markers;
use kernel::pagination::Page;

use crate::application::{
    ActiveServicesCache, CreateServiceUseCase, DeleteServiceUseCase, ListActiveServicesUseCase,
    ListServicesUseCase, ReorderServicesUseCase, SERVICE_PAGE_DEFAULTS, UpdateServiceUseCase,
};
use crate::domain::entity::{ActiveService, Service, ServiceFilter};
use crate::domain::repository::ServiceRepository;
use crate::error::CatalogResult;
use crate::presentation::dto::{
    CreateServiceRequest, ReorderRequestItem, ServiceListQuery, SuccessResponse,
    UpdateServiceRequest,
};

/// Shared state for catalog handlers
pub struct CatalogAppState<R>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub cache: Arc<ActiveServicesCache>,
    pub tokens: TokenService,
}

impl<R> Clone for CatalogAppState<R>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: Arc::clone(&self.repo),
            cache: Arc::clone(&self.cache),
            tokens: self.tokens.clone(),
        }
    }
}

impl<R> FromRef<CatalogAppState<R>> for TokenService
where
    R: ServiceRepository + Send + Sync + 'static,
{
    fn from_ref(state: &CatalogAppState<R>) -> Self {
        state.tokens.clone()
    }
}

/// GET /services
pub async fn list_active<R>(
    State(state): State<CatalogAppState<R>>,
) -> CatalogResult<Json<Vec<ActiveService>>>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let use_case = ListActiveServicesUseCase::new(state.repo.clone(), state.cache.clone());
    let services = use_case.execute().await?;
    Ok(Json(services.as_ref().clone()))
}

/// GET /services/admin
pub async fn list_admin<R>(
    _principal: Principal,
    State(state): State<CatalogAppState<R>>,
    ValidQuery(query): ValidQuery<ServiceListQuery>,
) -> CatalogResult<Json<Page<Service>>>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let filter = ServiceFilter {
        activo: query.activo,
        search: query.search.filter(|s| !s.is_empty()),
    };
    let page = query.page.resolve(SERVICE_PAGE_DEFAULTS);

    let use_case = ListServicesUseCase::new(state.repo.clone());
    Ok(Json(use_case.execute(filter, page).await?))
}

/// POST /services
pub async fn create<R>(
    _principal: Principal,
    State(state): State<CatalogAppState<R>>,
    Valid(req): Valid<CreateServiceRequest>,
) -> CatalogResult<Json<SuccessResponse>>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let use_case = CreateServiceUseCase::new(state.repo.clone(), state.cache.clone());
    use_case.execute(req.into()).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PATCH /services/reorder
pub async fn reorder<R>(
    _principal: Principal,
    State(state): State<CatalogAppState<R>>,
    ValidList(items): ValidList<ReorderRequestItem>,
) -> CatalogResult<Json<SuccessResponse>>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let use_case = ReorderServicesUseCase::new(state.repo.clone(), state.cache.clone());
    use_case
        .execute(items.into_iter().map(Into::into).collect())
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// PATCH /services/{id}
pub async fn update<R>(
    _principal: Principal,
    State(state): State<CatalogAppState<R>>,
    IdPath(id): IdPath<markers::Service>,
    Valid(req): Valid<UpdateServiceRequest>,
) -> CatalogResult<Json<SuccessResponse>>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let use_case = UpdateServiceUseCase::new(state.repo.clone(), state.cache.clone());
    use_case.execute(id, req.into()).await?;
    Ok(Json(SuccessResponse::ok()))
}

/// DELETE /services/{id}
pub async fn delete<R>(
    _principal: Principal,
    State(state): State<CatalogAppState<R>>,
    IdPath(id): IdPath<markers::Service>,
) -> CatalogResult<Json<SuccessResponse>>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    let use_case = DeleteServiceUseCase::new(state.repo.clone(), state.cache.clone());
    use_case.execute(id).await?;
    Ok(Json(SuccessResponse::ok()))
}
