//! In-memory record store with tab/session-scoped semantics.

use std::collections::HashMap;

use super::{StorageBackend, StorageError};

/// A record store that lives only as long as the value itself.
///
/// This is the tab-scoped backend for the session record (nothing outlives
/// the tab) and the backend of choice for unit tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with records, for restore-path tests.
    #[must_use]
    pub fn with_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Self {
            records: records.into_iter().collect(),
        }
    }

    /// Whether a record exists under `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.records.contains_key(key)
    }
}

impl StorageBackend for MemoryStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.records.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.records.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.records.remove(key);
        Ok(())
    }
}
