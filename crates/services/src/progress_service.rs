use std::sync::Arc;

use baython_core::model::Category;
use baython_core::progress::ProgressSummary;
use serde::Serialize;

use crate::completion_store::CompletionStore;
use crate::profile_service::ProfileService;

/// Progress statistics plus the streak, as shown on the progress view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSnapshot {
    pub summary: ProgressSummary,
    pub streak: u32,
}

impl ProgressSnapshot {
    #[must_use]
    pub fn learning_hours(&self) -> u32 {
        self.summary.learning_hours()
    }
}

/// Loads completion state and feeds it to the progress aggregator.
#[derive(Clone)]
pub struct ProgressService {
    completion: Arc<CompletionStore>,
    profile: Arc<ProfileService>,
}

impl ProgressService {
    #[must_use]
    pub fn new(completion: Arc<CompletionStore>, profile: Arc<ProfileService>) -> Self {
        Self {
            completion,
            profile,
        }
    }

    /// Fresh statistics from persisted state plus this session's marks.
    /// Never fails; unreadable values count as empty.
    ///
    /// Only IDs that still exist in the catalog are counted.
    pub async fn snapshot(&self) -> ProgressSnapshot {
        let catalog = self.completion.catalog();
        let lessons = self
            .completion
            .load_completion_set(Category::Lessons)
            .await;
        let exercises = self
            .completion
            .load_completion_set(Category::Exercises)
            .await;
        let streak = self.profile.streak().await;

        let summary = ProgressSummary::compute(
            lessons.count_in(catalog.lessons()),
            exercises.count_in(catalog.exercises()),
            catalog.len(Category::Lessons),
            catalog.len(Category::Exercises),
        );

        ProgressSnapshot { summary, streak }
    }
}
