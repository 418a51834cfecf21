//! Fake key-value stores for service tests.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use storage::repository::{InMemoryStore, KeyValueStore, StorageError};

/// In-memory store that counts writes per key.
#[derive(Default)]
pub struct RecordingStore {
    inner: InMemoryStore,
    writes: Mutex<Vec<String>>,
}

impl RecordingStore {
    pub fn with_entries<const N: usize>(entries: [(&str, &str); N]) -> Self {
        Self {
            inner: InMemoryStore::with_entries(entries),
            writes: Mutex::new(Vec::new()),
        }
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|k| k.as_str() == key)
            .count()
    }

    pub fn total_writes(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

#[async_trait]
impl KeyValueStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.writes.lock().unwrap().push(key.to_owned());
        self.inner.set(key, value).await
    }
}

/// Store whose reads and/or writes always fail.
pub struct FailingStore {
    inner: InMemoryStore,
    fail_reads: bool,
    attempted_writes: AtomicUsize,
}

impl FailingStore {
    /// Reads succeed against `entries`, every write fails.
    pub fn read_only<const N: usize>(entries: [(&str, &str); N]) -> Self {
        Self {
            inner: InMemoryStore::with_entries(entries),
            fail_reads: false,
            attempted_writes: AtomicUsize::new(0),
        }
    }

    /// Every read and write fails.
    pub fn broken() -> Self {
        Self {
            inner: InMemoryStore::new(),
            fail_reads: true,
            attempted_writes: AtomicUsize::new(0),
        }
    }

    pub fn attempted_writes(&self) -> usize {
        self.attempted_writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if self.fail_reads {
            return Err(StorageError::Connection("disk unavailable".into()));
        }
        self.inner.get(key).await
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        self.attempted_writes.fetch_add(1, Ordering::SeqCst);
        Err(StorageError::QuotaExceeded)
    }
}
