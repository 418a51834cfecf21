mod completion;
mod exercise;
mod ids;
mod lesson;
mod profile;

pub use ids::{ExerciseId, LessonId, ParseIdError};

pub use completion::{
    CatalogItem, Category, CompletionSet, CompletionSetError, Hydrated, hydrate,
};
pub use exercise::{Difficulty, Exercise};
pub use lesson::{BlockKind, ContentBlock, Lesson, LessonLevel};
pub use profile::{DEFAULT_DISPLAY_NAME, Profile, normalize_display_name};
