use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use baython_core::Catalog;
use baython_core::model::{Category, CompletionSet, Exercise, Hydrated, Lesson, hydrate};
use storage::keys::completion_key;
use storage::repository::KeyValueStore;

use crate::error::CompletionError;
use crate::persisted::{WriteOutcome, read_raw, write_raw};

/// Result of marking an item complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkOutcome {
    /// The category's set after the mark, ready for immediate use.
    pub set: CompletionSet,
    /// `false` if the item was already complete.
    pub newly_added: bool,
    pub write: WriteOutcome,
}

/// Single source of truth for which catalog items have been completed.
///
/// Created once per process and shared by reference. Each category is cached
/// after its first load; marks update the cache first and then persist the
/// whole set, so a failed write still leaves the current session consistent.
pub struct CompletionStore {
    catalog: Arc<Catalog>,
    kv: Arc<dyn KeyValueStore>,
    cache: Mutex<HashMap<Category, CompletionSet>>,
}

impl CompletionStore {
    #[must_use]
    pub fn new(catalog: Arc<Catalog>, kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            catalog,
            kv,
            cache: Mutex::new(HashMap::new()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Read the persisted set for `category`, merged with this session's marks.
    ///
    /// Absent, unreadable, or malformed values yield an empty set. Ids marked
    /// earlier in the session stay present even if their write failed, so the
    /// result is the union of storage and the cache. Never writes.
    pub async fn load_completion_set(&self, category: Category) -> CompletionSet {
        let mut set = self.read_persisted(category).await;
        let mut cache = self.lock_cache();
        if let Some(cached) = cache.get(&category) {
            for id in cached.iter() {
                set.insert(id);
            }
        }
        cache.insert(category, set.clone());
        set
    }

    /// Mark `id` complete in `category`.
    ///
    /// Already-complete items are left alone and nothing is written.
    ///
    /// # Errors
    ///
    /// Returns `CompletionError::UnknownItem` if `id` is not in the catalog;
    /// nothing is cached or persisted in that case.
    pub async fn mark_complete(
        &self,
        category: Category,
        id: &str,
    ) -> Result<MarkOutcome, CompletionError> {
        if !self.catalog.contains(category, id) {
            return Err(CompletionError::UnknownItem {
                category,
                id: id.to_owned(),
            });
        }

        self.ensure_loaded(category).await;

        let (set, newly_added) = {
            let mut cache = self.lock_cache();
            let entry = cache.entry(category).or_default();
            let added = entry.insert(id);
            (entry.clone(), added)
        };

        if !newly_added {
            tracing::debug!(%category, id, "item already complete");
            return Ok(MarkOutcome {
                set,
                newly_added,
                write: WriteOutcome::Unchanged,
            });
        }

        let write = self.persist(category, &set).await;
        tracing::info!(%category, id, ?write, "marked complete");
        Ok(MarkOutcome {
            set,
            newly_added,
            write,
        })
    }

    /// Whether `id` is complete, loading the category on first use.
    pub async fn is_completed(&self, category: Category, id: &str) -> bool {
        self.ensure_loaded(category).await;
        self.lock_cache()
            .get(&category)
            .is_some_and(|set| set.contains(id))
    }

    /// Catalog lessons with their completion flags, freshly loaded.
    pub async fn hydrated_lessons(&self) -> Vec<Hydrated<'_, Lesson>> {
        let set = self.load_completion_set(Category::Lessons).await;
        hydrate(self.catalog.lessons(), &set)
    }

    /// Catalog exercises with their completion flags, freshly loaded.
    pub async fn hydrated_exercises(&self) -> Vec<Hydrated<'_, Exercise>> {
        let set = self.load_completion_set(Category::Exercises).await;
        hydrate(self.catalog.exercises(), &set)
    }

    async fn ensure_loaded(&self, category: Category) {
        if self.lock_cache().contains_key(&category) {
            return;
        }
        let set = self.read_persisted(category).await;
        // Another caller may have loaded (and marked) in the meantime; keep theirs.
        self.lock_cache().entry(category).or_insert(set);
    }

    async fn read_persisted(&self, category: Category) -> CompletionSet {
        let key = completion_key(category);
        let Some(raw) = read_raw(self.kv.as_ref(), key).await else {
            return CompletionSet::new();
        };
        match CompletionSet::from_json(&raw) {
            Ok(set) => set,
            Err(error) => {
                tracing::warn!(%category, key, %error, "ignoring corrupted completion set");
                CompletionSet::new()
            }
        }
    }

    async fn persist(&self, category: Category, set: &CompletionSet) -> WriteOutcome {
        let key = completion_key(category);
        match set.to_json() {
            Ok(encoded) => write_raw(self.kv.as_ref(), key, &encoded).await,
            Err(error) => {
                tracing::error!(%category, key, %error, "failed to encode completion set");
                WriteOutcome::Failed
            }
        }
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<Category, CompletionSet>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FailingStore, RecordingStore};
    use storage::keys::{COMPLETED_EXERCISES, COMPLETED_LESSONS};
    use storage::repository::InMemoryStore;

    fn store_over(kv: Arc<dyn KeyValueStore>) -> CompletionStore {
        CompletionStore::new(Arc::new(Catalog::builtin()), kv)
    }

    #[tokio::test]
    async fn absent_key_loads_as_empty_set() {
        let store = store_over(Arc::new(InMemoryStore::new()));
        assert!(store.load_completion_set(Category::Lessons).await.is_empty());
    }

    #[tokio::test]
    async fn corrupted_value_loads_as_empty_set_without_writing() {
        let kv = Arc::new(RecordingStore::with_entries([(COMPLETED_LESSONS, "{not json")]));
        let store = store_over(kv.clone());

        let set = store.load_completion_set(Category::Lessons).await;

        assert!(set.is_empty());
        assert_eq!(kv.total_writes(), 0);
    }

    #[tokio::test]
    async fn unreadable_store_loads_as_empty_set() {
        let store = store_over(Arc::new(FailingStore::broken()));
        assert!(store.load_completion_set(Category::Exercises).await.is_empty());
    }

    #[tokio::test]
    async fn mark_complete_persists_new_ids() {
        let kv = Arc::new(InMemoryStore::new());
        let store = store_over(kv.clone());

        let outcome = store.mark_complete(Category::Lessons, "3").await.unwrap();

        assert!(outcome.newly_added);
        assert_eq!(outcome.write, WriteOutcome::Persisted);
        assert!(outcome.set.contains("3"));
        let persisted = kv.get(COMPLETED_LESSONS).await.unwrap();
        assert_eq!(persisted.as_deref(), Some(r#"["3"]"#));
    }

    #[tokio::test]
    async fn mark_complete_appends_to_previous_session() {
        let kv = Arc::new(InMemoryStore::with_entries([(COMPLETED_LESSONS, r#"["1","2"]"#)]));
        let store = store_over(kv.clone());

        let outcome = store.mark_complete(Category::Lessons, "4").await.unwrap();

        assert_eq!(outcome.set.iter().collect::<Vec<_>>(), vec!["1", "2", "4"]);
        let persisted = kv.get(COMPLETED_LESSONS).await.unwrap();
        assert_eq!(persisted.as_deref(), Some(r#"["1","2","4"]"#));
    }

    #[tokio::test]
    async fn mark_complete_twice_writes_once() {
        let kv = Arc::new(RecordingStore::default());
        let store = store_over(kv.clone());

        let first = store.mark_complete(Category::Exercises, "2").await.unwrap();
        let second = store.mark_complete(Category::Exercises, "2").await.unwrap();

        assert_eq!(first.write, WriteOutcome::Persisted);
        assert_eq!(second.write, WriteOutcome::Unchanged);
        assert!(!second.newly_added);
        assert_eq!(first.set, second.set);
        assert_eq!(kv.writes_to(COMPLETED_EXERCISES), 1);
    }

    #[tokio::test]
    async fn already_persisted_id_is_not_rewritten() {
        let kv = Arc::new(RecordingStore::with_entries([(
            COMPLETED_EXERCISES,
            r#"["1","7"]"#,
        )]));
        let store = store_over(kv.clone());

        let outcome = store.mark_complete(Category::Exercises, "7").await.unwrap();

        assert_eq!(kv.total_writes(), 0);
        assert_eq!(outcome.write, WriteOutcome::Unchanged);
        assert_eq!(outcome.set.iter().filter(|id| *id == "7").count(), 1);
        let persisted = kv.get(COMPLETED_EXERCISES).await.unwrap();
        assert_eq!(persisted.as_deref(), Some(r#"["1","7"]"#));
    }

    #[tokio::test]
    async fn unknown_ids_are_rejected_without_writing() {
        let kv = Arc::new(RecordingStore::default());
        let store = store_over(kv.clone());

        let err = store.mark_complete(Category::Lessons, "99").await.unwrap_err();

        assert_eq!(
            err,
            CompletionError::UnknownItem {
                category: Category::Lessons,
                id: "99".into(),
            }
        );
        assert_eq!(kv.total_writes(), 0);
        assert!(!store.is_completed(Category::Lessons, "99").await);
    }

    #[tokio::test]
    async fn failed_write_still_updates_session_state() {
        let kv = Arc::new(FailingStore::read_only([(COMPLETED_LESSONS, r#"["1"]"#)]));
        let store = store_over(kv.clone());

        let outcome = store.mark_complete(Category::Lessons, "2").await.unwrap();

        assert_eq!(outcome.write, WriteOutcome::Failed);
        assert!(outcome.set.contains("2"));
        assert!(store.is_completed(Category::Lessons, "2").await);
        assert_eq!(kv.attempted_writes(), 1);
    }

    #[tokio::test]
    async fn failed_write_survives_reload() {
        let kv = Arc::new(FailingStore::read_only([(COMPLETED_LESSONS, r#"["1"]"#)]));
        let store = store_over(kv);

        let outcome = store.mark_complete(Category::Lessons, "2").await.unwrap();
        assert_eq!(outcome.write, WriteOutcome::Failed);

        let reloaded = store.load_completion_set(Category::Lessons).await;
        assert_eq!(reloaded.iter().collect::<Vec<_>>(), vec!["1", "2"]);

        let lessons = store.hydrated_lessons().await;
        let done: Vec<_> = lessons
            .iter()
            .filter(|lesson| lesson.completed())
            .map(|lesson| lesson.id().as_str())
            .collect();
        assert_eq!(done, vec!["1", "2"]);
        assert!(store.is_completed(Category::Lessons, "2").await);
    }

    #[tokio::test]
    async fn reload_picks_up_ids_written_elsewhere() {
        let kv = Arc::new(InMemoryStore::new());
        let store = store_over(kv.clone());

        store.mark_complete(Category::Exercises, "1").await.unwrap();
        kv.set(COMPLETED_EXERCISES, r#"["1","5"]"#).await.unwrap();

        let set = store.load_completion_set(Category::Exercises).await;
        assert_eq!(set.iter().collect::<Vec<_>>(), vec!["1", "5"]);
    }

    #[tokio::test]
    async fn categories_are_independent() {
        let kv = Arc::new(InMemoryStore::new());
        let store = store_over(kv.clone());

        store.mark_complete(Category::Lessons, "1").await.unwrap();

        assert!(store.is_completed(Category::Lessons, "1").await);
        assert!(!store.is_completed(Category::Exercises, "1").await);
        assert_eq!(kv.get(COMPLETED_EXERCISES).await.unwrap(), None);
    }

    #[tokio::test]
    async fn hydrated_views_ignore_stale_ids() {
        let kv = Arc::new(InMemoryStore::with_entries([(
            COMPLETED_LESSONS,
            r#"["2","legacy-42"]"#,
        )]));
        let store = store_over(kv);

        let lessons = store.hydrated_lessons().await;

        assert_eq!(lessons.len(), 8);
        let done: Vec<_> = lessons
            .iter()
            .filter(|lesson| lesson.completed())
            .map(|lesson| lesson.id().as_str())
            .collect();
        assert_eq!(done, vec!["2"]);
    }
}
