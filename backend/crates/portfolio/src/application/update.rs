//! Update Portfolio Item Use Case

use std::sync::Arc;

use kernel::id::PortfolioItemId;
use platform::image::ImageUpload;
use platform::storage::ObjectStorage;

use crate::application::{ActivePortfolioCache, discard_image};
use crate::domain::entity::PortfolioPatch;
use crate::domain::repository::PortfolioRepository;
use crate::error::{PortfolioError, PortfolioResult};

pub struct UpdatePortfolioItemUseCase<R, S>
where
    R: PortfolioRepository,
    S: ObjectStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    cache: Arc<ActivePortfolioCache>,
}

impl<R, S> UpdatePortfolioItemUseCase<R, S>
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

    /// A new photo replaces the stored one: upload, write the row, then
    /// drop the old object. A failed write discards the new upload instead.
    /// Without a photo an empty patch is a no-op.
    pub async fn execute(
        &self,
        id: PortfolioItemId,
        mut patch: PortfolioPatch,
        foto: Option<ImageUpload>,
    ) -> PortfolioResult<()> {
        let mut replaced = None;
        if let Some(image) = foto {
            let current = self
                .repo
                .find(id)
                .await
                .map_err(PortfolioError::Fetch)?
                .ok_or(PortfolioError::NotFound)?;

            let url = self
                .storage
                .upload(&image)
                .await
                .map_err(PortfolioError::Upload)?;
            replaced = current.foto_url;
            patch.foto_url = Some(url);
        }

        if patch.is_empty() {
            return Ok(());
        }

        let written = match self.repo.update(id, &patch).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(PortfolioError::NotFound),
            Err(e) => Err(PortfolioError::Update(e)),
        };
        if let Err(e) = written {
            if let Some(url) = &patch.foto_url {
                discard_image(self.storage.as_ref(), url).await;
            }
            return Err(e);
        }

        if let Some(old) = &replaced {
            discard_image(self.storage.as_ref(), old).await;
        }

        self.cache.invalidate();
        tracing::info!(portfolio_id = %id, "Portfolio item updated");
        Ok(())
    }
}
