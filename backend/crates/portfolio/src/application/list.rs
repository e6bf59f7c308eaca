//! Portfolio listings

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::application::ActivePortfolioCache;
use crate::domain::entity::{ActivePortfolioItem, PortfolioEntry, PortfolioFilter};
use crate::domain::repository::PortfolioRepository;
use crate::error::{PortfolioError, PortfolioResult};

/// Public listing, served from the cache while it is fresh.
pub struct ListActivePortfolioUseCase<R>
where
    R: PortfolioRepository,
{
    repo: Arc<R>,
    cache: Arc<ActivePortfolioCache>,
}

impl<R> ListActivePortfolioUseCase<R>
where
    R: PortfolioRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<ActivePortfolioCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self) -> PortfolioResult<Arc<Vec<ActivePortfolioItem>>> {
        if let Some(cached) = self.cache.get() {
            tracing::debug!("Active portfolio served from cache");
            return Ok(cached);
        }

        let items = self.repo.list_active().await.map_err(PortfolioError::Fetch)?;
        Ok(self.cache.put(items))
    }
}

pub struct ListPortfolioUseCase<R>
where
    R: PortfolioRepository,
{
    repo: Arc<R>,
}

impl<R> ListPortfolioUseCase<R>
where
    R: PortfolioRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        filter: PortfolioFilter,
        page: PageRequest,
    ) -> PortfolioResult<Page<PortfolioEntry>> {
        let (data, total) = self
            .repo
            .list(&filter, &page)
            .await
            .map_err(PortfolioError::Fetch)?;
        Ok(Page::new(data, total, &page))
    }
}
