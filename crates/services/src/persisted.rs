//! Best-effort reads and writes over a `KeyValueStore`.
//!
//! Progress and profile values are local, non-critical state: read failures
//! fall back to defaults and write failures are logged, never escalated.

use serde::Serialize;
use serde::de::DeserializeOwned;
use storage::repository::KeyValueStore;

/// What happened to a write that was attempted (or skipped).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The new value reached the store.
    Persisted,
    /// Nothing changed, so nothing was written.
    Unchanged,
    /// The store rejected the write; only in-memory state reflects it.
    Failed,
}

impl WriteOutcome {
    #[must_use]
    pub fn is_durable(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Raw value under `key`, or `None` if absent or unreadable.
pub(crate) async fn read_raw(kv: &dyn KeyValueStore, key: &str) -> Option<String> {
    match kv.get(key).await {
        Ok(value) => value,
        Err(error) => {
            tracing::warn!(key, %error, "failed to read persisted value, using default");
            None
        }
    }
}

/// JSON-decoded value under `key`, or `None` if absent, unreadable, or malformed.
pub(crate) async fn read_json<T: DeserializeOwned>(kv: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = read_raw(kv, key).await?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::warn!(key, %error, "ignoring malformed persisted value");
            None
        }
    }
}

pub(crate) async fn write_raw(kv: &dyn KeyValueStore, key: &str, value: &str) -> WriteOutcome {
    match kv.set(key, value).await {
        Ok(()) => {
            tracing::debug!(key, "persisted value");
            WriteOutcome::Persisted
        }
        Err(error) => {
            tracing::error!(key, %error, "failed to persist value");
            WriteOutcome::Failed
        }
    }
}

pub(crate) async fn write_json<T: Serialize>(
    kv: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> WriteOutcome {
    match serde_json::to_string(value) {
        Ok(encoded) => write_raw(kv, key, &encoded).await,
        Err(error) => {
            tracing::error!(key, %error, "failed to encode value");
            WriteOutcome::Failed
        }
    }
}
