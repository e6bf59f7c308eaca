//! Mark a contact message answered or unanswered

use std::sync::Arc;

use chrono::Utc;
use kernel::id::ContactId;

use crate::domain::repository::ContactRepository;
use crate::error::{ContactError, ContactResult};

pub struct UpdateContactUseCase<R>
where
    R: ContactRepository,
{
    repo: Arc<R>,
}

impl<R> UpdateContactUseCase<R>
where
    R: ContactRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// `respondido_at` becomes now when answered and is cleared otherwise.
    pub async fn execute(&self, id: ContactId, respondido: bool) -> ContactResult<()> {
        let respondido_at = respondido.then(Utc::now);

        let found = self
            .repo
            .set_respondido(id, respondido, respondido_at)
            .await
            .map_err(ContactError::Update)?;
        if !found {
            return Err(ContactError::NotFound);
        }

        tracing::info!(contact_id = %id, respondido, "Contact updated");
        Ok(())
    }
}
