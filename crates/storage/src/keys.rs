//! Persisted key names.
//!
//! These match the keys earlier releases wrote, so existing progress keeps
//! loading after an upgrade.

use baython_core::model::Category;

pub const COMPLETED_LESSONS: &str = "@baython_completed_lessons";
pub const COMPLETED_EXERCISES: &str = "@baython_completed_exercises";
pub const PROFILE_NAME: &str = "@baython_profile_name";
pub const DARK_MODE: &str = "@baython_dark_mode";
pub const STREAK: &str = "@baython_streak";

/// Key holding the JSON array of completed IDs for `category`.
#[must_use]
pub fn completion_key(category: Category) -> &'static str {
    match category {
        Category::Lessons => COMPLETED_LESSONS,
        Category::Exercises => COMPLETED_EXERCISES,
    }
}
