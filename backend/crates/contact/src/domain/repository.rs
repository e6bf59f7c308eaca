//! Repository Traits

use chrono::{DateTime, Utc};
use kernel::id::ContactId;
use kernel::pagination::PageRequest;

use crate::domain::entity::{ContactFilter, ContactMessage, NewContact};

/// Contact repository trait. Errors are the store's own; the use cases
/// decide what the caller is told.
#[trait_variant::make(ContactRepository: Send)]
pub trait LocalContactRepository {
    /// Store a public submission
    async fn insert(&self, contact: &NewContact) -> Result<(), sqlx::Error>;

    /// One page of matching messages plus the total match count
    async fn list(
        &self,
        filter: &ContactFilter,
        page: &PageRequest,
    ) -> Result<(Vec<ContactMessage>, i64), sqlx::Error>;

    /// Set the answered flag and its timestamp. Returns false when no row
    /// has this id.
    async fn set_respondido(
        &self,
        id: ContactId,
        respondido: bool,
        respondido_at: Option<DateTime<Utc>>,
    ) -> Result<bool, sqlx::Error>;
}
