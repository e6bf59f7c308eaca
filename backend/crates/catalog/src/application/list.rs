//! Service listings

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::application::ActiveServicesCache;
use crate::domain::entity::{ActiveService, Service, ServiceFilter};
use crate::domain::repository::ServiceRepository;
use crate::error::{CatalogError, CatalogResult};

/// Public listing, served from the cache while it is fresh.
pub struct ListActiveServicesUseCase<R>
where
    R: ServiceRepository,
{
    repo: Arc<R>,
    cache: Arc<ActiveServicesCache>,
}

impl<R> ListActiveServicesUseCase<R>
where
    R: ServiceRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<ActiveServicesCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self) -> CatalogResult<Arc<Vec<ActiveService>>> {
        if let Some(cached) = self.cache.get() {
            tracing::debug!("Active services served from cache");
            return Ok(cached);
        }

        let services = self.repo.list_active().await.map_err(CatalogError::Fetch)?;
        Ok(self.cache.put(services))
    }
}

/// Operator listing with filter and pagination.
pub struct ListServicesUseCase<R>
where
    R: ServiceRepository,
{
    repo: Arc<R>,
}

impl<R> ListServicesUseCase<R>
where
    R: ServiceRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        filter: ServiceFilter,
        page: PageRequest,
    ) -> CatalogResult<Page<Service>> {
        let (data, total) = self
            .repo
            .list(&filter, &page)
            .await
            .map_err(CatalogError::Fetch)?;
        Ok(Page::new(data, total, &page))
    }
}
