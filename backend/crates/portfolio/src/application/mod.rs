//! Application Layer

pub mod create;
pub mod delete;
pub mod list;
pub mod update;

pub use create::{CreatePortfolioInput, CreatePortfolioItemUseCase};
pub use delete::DeletePortfolioItemUseCase;
pub use list::{ListActivePortfolioUseCase, ListPortfolioUseCase};
pub use update::UpdatePortfolioItemUseCase;

use kernel::pagination::{PageDefaults, SortOrder};
use platform::cache::TtlCache;
use platform::storage::ObjectStorage;

use crate::domain::entity::ActivePortfolioItem;

/// Public listing cache, shared by every handler and invalidated on writes.
pub type ActivePortfolioCache = TtlCache<Vec<ActivePortfolioItem>>;

/// Operator listing defaults: newest first, twenty per page.
pub const PORTFOLIO_PAGE_DEFAULTS: PageDefaults = PageDefaults {
    limit: 20,
    sort_field: "fecha",
    sort_order: SortOrder::Desc,
};

/// Best-effort removal of a stored photo. Failures are only logged.
pub(crate) async fn discard_image<S>(storage: &S, public_url: &str)
where
    S: ObjectStorage,
{
    if let Err(e) = storage.delete(public_url).await {
        tracing::warn!(error = %e, url = %public_url, "Failed to delete portfolio image");
    }
}
