use std::sync::Arc;

use baython_core::Catalog;
use storage::repository::Storage;

use crate::completion_store::CompletionStore;
use crate::error::AppServicesError;
use crate::profile_service::ProfileService;
use crate::progress_service::ProgressService;

/// Assembles app-facing services over one storage backend and one catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<Catalog>,
    completion: Arc<CompletionStore>,
    profile: Arc<ProfileService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, Arc::new(Catalog::builtin())))
    }

    /// Build services over in-memory storage, for tests and demos.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_storage(&Storage::in_memory(), Arc::new(Catalog::builtin()))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, catalog: Arc<Catalog>) -> Self {
        let completion = Arc::new(CompletionStore::new(
            Arc::clone(&catalog),
            Arc::clone(&storage.kv),
        ));
        let profile = Arc::new(ProfileService::new(Arc::clone(&storage.kv)));
        let progress = Arc::new(ProgressService::new(
            Arc::clone(&completion),
            Arc::clone(&profile),
        ));

        Self {
            catalog,
            completion,
            profile,
            progress,
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<Catalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn completion(&self) -> Arc<CompletionStore> {
        Arc::clone(&self.completion)
    }

    #[must_use]
    pub fn profile(&self) -> Arc<ProfileService> {
        Arc::clone(&self.profile)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use baython_core::model::Category;

    #[tokio::test]
    async fn services_share_one_completion_store() {
        let services = AppServices::in_memory();

        services
            .completion()
            .mark_complete(Category::Lessons, "1")
            .await
            .unwrap();

        let snapshot = services.progress().snapshot().await;
        assert_eq!(snapshot.summary.completed_lessons, 1);
        assert!(snapshot.summary.achievements[0].unlocked);
    }
}
