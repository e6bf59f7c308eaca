//! Delete Portfolio Item Use Case

use std::sync::Arc;

use kernel::id::PortfolioItemId;
use platform::storage::ObjectStorage;

use crate::application::{ActivePortfolioCache, discard_image};
use crate::domain::repository::PortfolioRepository;
use crate::error::{PortfolioError, PortfolioResult};

pub struct DeletePortfolioItemUseCase<R, S>
where
    R: PortfolioRepository,
    S: ObjectStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    cache: Arc<ActivePortfolioCache>,
}

impl<R, S> DeletePortfolioItemUseCase<R, S>
where
    R: PortfolioRepository,
    S: ObjectStorage + Sync,
{
    pub fn new(repo: Arc<R>, storage: Arc<S>, cache: Arc<ActivePortfolioCache>) -> Self {
        Self {
            repo,
            storage,
            cache,
        }
    }

    /// The row decides the outcome; the photo is removed afterwards on a
    /// best-effort basis.
    pub async fn execute(&self, id: PortfolioItemId) -> PortfolioResult<()> {
        let current = self
            .repo
            .find(id)
            .await
            .map_err(PortfolioError::Fetch)?
            .ok_or(PortfolioError::NotFound)?;

        let found = self.repo.delete(id).await.map_err(PortfolioError::Delete)?;
        if !found {
            return Err(PortfolioError::NotFound);
        }

        if let Some(url) = &current.foto_url {
            discard_image(self.storage.as_ref(), url).await;
        }

        self.cache.invalidate();
        tracing::info!(portfolio_id = %id, "Portfolio item deleted");
        Ok(())
    }
}
