use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use thiserror::Error;

use crate::model::{Exercise, Lesson};

/// Tracked completion category. Each category is persisted independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Lessons,
    Exercises,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lessons => "lessons",
            Self::Exercises => "exercises",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Anything in the catalog that can be marked complete.
pub trait CatalogItem {
    const CATEGORY: Category;

    fn item_id(&self) -> &str;
}

impl CatalogItem for Lesson {
    const CATEGORY: Category = Category::Lessons;

    fn item_id(&self) -> &str {
        self.id().as_str()
    }
}

impl CatalogItem for Exercise {
    const CATEGORY: Category = Category::Exercises;

    fn item_id(&self) -> &str {
        self.id().as_str()
    }
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionSetError {
    #[error("malformed completion set: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Completed item IDs for one category.
///
/// Set semantics with insertion order kept, so the persisted JSON array reads
/// in the order items were finished. Sets are small (one entry per catalog
/// item), so membership is a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct CompletionSet {
    ids: Vec<String>,
}

impl CompletionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from IDs, dropping duplicates while keeping first-seen order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        for id in ids {
            set.insert(id);
        }
        set
    }

    /// Insert an ID. Returns `true` if it was not already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if self.contains(&id) {
            return false;
        }
        self.ids.push(id);
        true
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|existing| existing == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of members that name an item in `items`. Unknown IDs are inert.
    #[must_use]
    pub fn count_in<T: CatalogItem>(&self, items: &[T]) -> usize {
        items
            .iter()
            .filter(|item| self.contains(item.item_id()))
            .count()
    }

    /// Parse the persisted JSON array form.
    ///
    /// # Errors
    ///
    /// Returns `CompletionSetError::Malformed` if `raw` is not a JSON array of strings.
    pub fn from_json(raw: &str) -> Result<Self, CompletionSetError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Serialize to the persisted JSON array form.
    ///
    /// # Errors
    ///
    /// Returns `CompletionSetError::Malformed` if serialization fails.
    pub fn to_json(&self) -> Result<String, CompletionSetError> {
        Ok(serde_json::to_string(&self.ids)?)
    }
}

impl From<Vec<String>> for CompletionSet {
    fn from(ids: Vec<String>) -> Self {
        Self::from_ids(ids)
    }
}

impl From<CompletionSet> for Vec<String> {
    fn from(set: CompletionSet) -> Self {
        set.ids
    }
}

/// A borrowed catalog item with its derived completion flag.
#[derive(Debug, PartialEq, Eq)]
pub struct Hydrated<'a, T> {
    item: &'a T,
    completed: bool,
}

// Manual impls: a derive would require `T: Copy`.
impl<T> Clone for Hydrated<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Hydrated<'_, T> {}

impl<'a, T> Hydrated<'a, T> {
    #[must_use]
    pub fn item(&self) -> &'a T {
        self.item
    }

    #[must_use]
    pub fn completed(&self) -> bool {
        self.completed
    }
}

impl<T> Deref for Hydrated<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.item
    }
}

/// Overlay `completed` onto catalog items by ID membership in `set`.
///
/// Keeps catalog order and never touches the catalog itself.
#[must_use]
pub fn hydrate<'a, T: CatalogItem>(items: &'a [T], set: &CompletionSet) -> Vec<Hydrated<'a, T>> {
    items
        .iter()
        .map(|item| Hydrated {
            item,
            completed: set.contains(item.item_id()),
        })
        .collect()
}
