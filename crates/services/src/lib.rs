#![forbid(unsafe_code)]

pub mod app_services;
pub mod completion_store;
pub mod error;
pub mod persisted;
pub mod profile_service;
pub mod progress_service;

#[cfg(test)]
mod test_support;

pub use app_services::AppServices;
pub use completion_store::{CompletionStore, MarkOutcome};
pub use error::{AppServicesError, CompletionError};
pub use persisted::WriteOutcome;
pub use profile_service::ProfileService;
pub use progress_service::{ProgressService, ProgressSnapshot};
