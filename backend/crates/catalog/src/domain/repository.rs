//! Repository Traits

use kernel::id::ServiceId;
use kernel::pagination::PageRequest;

use crate::domain::entity::{ActiveService, NewService, Service, ServiceFilter, ServicePatch};

#[trait_variant::make(ServiceRepository: Send)]
pub trait LocalServiceRepository {
    /// Active services by `orden` ascending
    async fn list_active(&self) -> Result<Vec<ActiveService>, sqlx::Error>;

    /// One page of matching services plus the total match count
    async fn list(
        &self,
        filter: &ServiceFilter,
        page: &PageRequest,
    ) -> Result<(Vec<Service>, i64), sqlx::Error>;

    /// Highest `orden` in use, if any service exists
    async fn max_orden(&self) -> Result<Option<i32>, sqlx::Error>;

    async fn insert(&self, service: &NewService) -> Result<(), sqlx::Error>;

    /// Write the present members. Returns false when no row has this id.
    async fn update(&self, id: ServiceId, patch: &ServicePatch) -> Result<bool, sqlx::Error>;

    /// Set one service's `orden`. A missing id is not an error.
    async fn set_orden(&self, id: ServiceId, orden: i32) -> Result<(), sqlx::Error>;

    /// Returns false when no row has this id.
    async fn delete(&self, id: ServiceId) -> Result<bool, sqlx::Error>;
}
