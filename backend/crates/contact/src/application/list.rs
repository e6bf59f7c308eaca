//! List Contacts Use Case

use std::sync::Arc;

use kernel::pagination::{Page, PageRequest};

use crate::domain::entity::{ContactFilter, ContactMessage};
use crate::domain::repository::ContactRepository;
use crate::error::{ContactError, ContactResult};

pub struct ListContactsUseCase<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> ListContactsUseCase<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(
        &self,
        filter: ContactFilter,
        page: PageRequest,
    ) -> ContactResult<Page<ContactMessage>> {
        let (data, total) = self
            .repo
            .list(&filter, &page)
            .await
            .map_err(ContactError::Fetch)?;
        Ok(Page::new(data, total, &page))
    }
}
