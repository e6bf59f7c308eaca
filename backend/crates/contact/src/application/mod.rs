//! Application Layer

pub mod config;
pub mod list;
pub mod notifier;
pub mod submit;
pub mod update;

pub use config::NotificationConfig;
pub use list::ListContactsUseCase;
pub use notifier::ContactNotifier;
pub use submit::{SubmitContactInput, SubmitContactUseCase};
pub use update::UpdateContactUseCase;

use kernel::pagination::{PageDefaults, SortOrder};

/// Inbox listing defaults: newest first, ten per page.
pub const CONTACT_PAGE_DEFAULTS: PageDefaults = PageDefaults {
    limit: 10,
    sort_field: "created_at",
    sort_order: SortOrder::Desc,
};
