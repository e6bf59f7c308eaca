//! Create Portfolio Item Use Case

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::ServiceId;
use platform::image::ImageUpload;
use platform::storage::ObjectStorage;

use crate::application::{ActivePortfolioCache, discard_image};
use crate::domain::entity::NewPortfolioItem;
use crate::domain::repository::PortfolioRepository;
use crate::error::{PortfolioError, PortfolioResult};

pub struct CreatePortfolioInput {
    pub titulo: String,
    pub descripcion: Option<String>,
    pub service_id: ServiceId,
    pub fecha: NaiveDate,
    pub activo: Option<bool>,
}

pub struct CreatePortfolioItemUseCase<R, S>
where
    R: PortfolioRepository,
    S: ObjectStorage,
{
    repo: Arc<R>,
    storage: Arc<S>,
    cache: Arc<ActivePortfolioCache>,
}

impl<R, S> CreatePortfolioItemUseCase<R, S>
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

    /// Uploads the photo first; an upload failure creates nothing.
    pub async fn execute(
        &self,
        input: CreatePortfolioInput,
        foto: Option<ImageUpload>,
    ) -> PortfolioResult<()> {
        let foto_url = match &foto {
            Some(image) => Some(
                self.storage
                    .upload(image)
                    .await
                    .map_err(PortfolioError::Upload)?,
            ),
            None => None,
        };

        let item = NewPortfolioItem {
            titulo: input.titulo,
            descripcion: input.descripcion,
            service_id: input.service_id,
            fecha: input.fecha,
            foto_url,
            activo: input.activo.unwrap_or(true),
        };

        if let Err(e) = self.repo.insert(&item).await {
            if let Some(url) = &item.foto_url {
                discard_image(self.storage.as_ref(), url).await;
            }
            return Err(PortfolioError::Create(e));
        }

        self.cache.invalidate();
        tracing::info!(titulo = %item.titulo, "Portfolio item created");
        Ok(())
    }
}
