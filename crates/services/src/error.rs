//! Shared error types for the services crate.

use thiserror::Error;

use baython_core::model::Category;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `CompletionStore`.
///
/// Persistence problems are not errors here; they surface as
/// `WriteOutcome::Failed` and a log line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CompletionError {
    #[error("no {category} item with id {id:?} in the catalog")]
    UnknownItem { category: Category, id: String },
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
