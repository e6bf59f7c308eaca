//! Update Service Use Case

use std::sync::Arc;

use kernel::id::ServiceId;

use crate::application::ActiveServicesCache;
use crate::domain::entity::ServicePatch;
use crate::domain::repository::ServiceRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct UpdateServiceUseCase<R>
where
    R: ServiceRepository,
{
    repo: Arc<R>,
    cache: Arc<ActiveServicesCache>,
}

impl<R> UpdateServiceUseCase<R>
where
    R: ServiceRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<ActiveServicesCache>) -> Self {
        Self { repo, cache }
    }

    /// An empty patch succeeds without touching the store.
    pub async fn execute(&self, id: ServiceId, patch: ServicePatch) -> CatalogResult<()> {
        if patch.is_empty() {
            return Ok(());
        }

        let found = self
            .repo
            .update(id, &patch)
            .await
            .map_err(CatalogError::Update)?;
        if !found {
            return Err(CatalogError::NotFound);
        }

        self.cache.invalidate();
        tracing::info!(service_id = %id, "Service updated");
        Ok(())
    }
}
