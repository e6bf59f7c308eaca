//! Create Service Use Case

use std::sync::Arc;

use crate::application::ActiveServicesCache;
use crate::domain::entity::{NewService, next_orden};
use crate::domain::repository::ServiceRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct CreateServiceInput {
    pub titulo: String,
    pub descripcion: String,
    pub icono: String,
    pub orden: Option<i32>,
    pub activo: Option<bool>,
}

pub struct CreateServiceUseCase<R>
where
    R: ServiceRepository,
{
    repo: Arc<R>,
    cache: Arc<ActiveServicesCache>,
}

impl<R> CreateServiceUseCase<R>
where
    R: ServiceRepository,
{
    pub fn new(repo: Arc<R>, cache: Arc<ActiveServicesCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, input: CreateServiceInput) -> CatalogResult<()> {
        // Read then insert; two concurrent creates can pick the same orden.
        let orden = match input.orden {
            Some(orden) => orden,
            None => next_orden(self.repo.max_orden().await.map_err(CatalogError::Create)?),
        };

        let service = NewService {
            titulo: input.titulo,
            descripcion: input.descripcion,
            icono: input.icono,
            orden,
            activo: input.activo.unwrap_or(true),
        };
        self.repo
            .insert(&service)
            .await
            .map_err(CatalogError::Create)?;

        self.cache.invalidate();
        tracing::info!(titulo = %service.titulo, orden, "Service created");
        Ok(())
    }
}
