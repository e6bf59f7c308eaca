//! Application Layer

pub mod create;
pub mod delete;
pub mod list;
pub mod reorder;
pub mod update;

pub use create::{CreateServiceInput, CreateServiceUseCase};
pub use delete::DeleteServiceUseCase;
pub use list::{ListActiveServicesUseCase, ListServicesUseCase};
pub use reorder::ReorderServicesUseCase;
pub use update::UpdateServiceUseCase;

use kernel::pagination::{PageDefaults, SortOrder};
use platform::cache::TtlCache;

use crate::domain::entity::ActiveService;

/// Public listing cache, shared by every handler and invalidated on writes.
pub type ActiveServicesCache = TtlCache<Vec<ActiveService>>;

/// Operator listing defaults: display order, twenty per page.
pub const SERVICE_PAGE_DEFAULTS: PageDefaults = PageDefaults {
    limit: 20,
    sort_field: "orden",
    sort_order: SortOrder::Asc,
};
