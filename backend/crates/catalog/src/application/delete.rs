//! Delete Service Use Case

use std::sync::Arc;

use kernel::id::ServiceId;

use crate::application::ActiveServicesCache;
use crate::domain::repository::ServiceRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct DeleteServiceUseCase<R>
where
    R: ServiceRepository,
{
    repo: Arc<R>,
    cache: Arc<ActiveServicesCache>,
}

impl<R> DeleteServiceUseCase<R>
where
    R: ServiceRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<ActiveServicesCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, id: ServiceId) -> CatalogResult<()> {
        let found = self.repo.delete(id).await.map_err(CatalogError::Delete)?;
        if !found {
            return Err(CatalogError::NotFound);
        }

        self.cache.invalidate();
        tracing::info!(service_id = %id, "Service deleted");
        Ok(())
    }
}
