//! Repository Traits

use kernel::id::PortfolioItemId;
use kernel::pagination::PageRequest;

use crate::domain::entity::{
    ActivePortfolioItem, NewPortfolioItem, PortfolioEntry, PortfolioFilter, PortfolioItem,
    PortfolioPatch,
};

#[trait_variant::make(PortfolioRepository: Send)]
pub trait LocalPortfolioRepository {
    /// Active items with their service title, newest `fecha` first
    async fn list_active(&self) -> Result<Vec<ActivePortfolioItem>, sqlx::Error>;

    /// One page of matching items plus the total match count
    async fn list(
        &self,
        filter: &PortfolioFilter,
        page: &PageRequest,
    ) -> Result<(Vec<PortfolioEntry>, i64), sqlx::Error>;

    async fn find(&self, id: PortfolioItemId) -> Result<Option<PortfolioItem>, sqlx::Error>;

    async fn insert(&self, item: &NewPortfolioItem) -> Result<(), sqlx::Error>;

    /// Write the present members. Returns false when no row has this id.
    async fn update(&self, id: PortfolioItemId, patch: &PortfolioPatch) -> Result<bool, sqlx::Error>;

    /// Returns false when no row has this id.
    async fn delete(&self, id: PortfolioItemId) -> Result<bool, sqlx::Error>;
}
