//! Reorder Services Use Case
//!
//! One concurrent update per item. Every task is awaited before the
//! outcome is decided, and nothing is rolled back when one fails.

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::application::ActiveServicesCache;
use crate::domain::entity::ReorderItem;
use crate::domain::repository::ServiceRepository;
use crate::error::{CatalogError, CatalogResult};

pub struct ReorderServicesUseCase<R>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    repo: Arc<R>,
    cache: Arc<ActiveServicesCache>,
}

impl<R> ReorderServicesUseCase<R>
where
    R: ServiceRepository + Send + Sync + 'static,
{
    pub fn new(repo: Arc<R>, cache: Arc<ActiveServicesCache>) -> Self {
        Self { repo, cache }
    }

    pub async fn execute(&self, items: Vec<ReorderItem>) -> CatalogResult<()> {
        let count = items.len();
        let mut tasks = JoinSet::new();
        for item in items {
            let repo = Arc::clone(&self.repo);
            tasks.spawn(async move { repo.set_orden(item.id, item.orden).await });
        }

        let mut first_error = None;
        while let Some(joined) = tasks.join_next().await {
            let outcome = match joined {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => CatalogError::Reorder(e),
                Err(e) => CatalogError::Task(e),
            };
            first_error.get_or_insert(outcome);
        }

        // Some rows may have changed even on failure.
        self.cache.invalidate();

        if let Some(err) = first_error {
            return Err(err);
        }
        tracing::info!(count, "Services reordered");
        Ok(())
    }
}
