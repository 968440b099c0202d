use std::collections::hash_map::Entry;
use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::persistence::{PersistenceError, PersistenceResult};

/// Byte-level key/value cache.
///
/// `put_if_absent` must be atomic per key: of two concurrent writers to the
/// same key exactly one observes `Persisted`.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError>;

    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<PersistenceResult, PersistenceError>;
}

/// In-memory [`CacheStore`].
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.lock().contains_key(key)
    }

    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries.lock().get(key).cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

#[async_trait]
impl CacheStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistenceError> {
        Ok(self.entries.lock().get(key).cloned())
    }

    async fn put_if_absent(
        &self,
        key: &str,
        bytes: Vec<u8>,
    ) -> Result<PersistenceResult, PersistenceError> {
        match self.entries.lock().entry(key.to_string()) {
            Entry::Occupied(_) => Ok(PersistenceResult::AlreadyPresent),
            Entry::Vacant(slot) => {
                slot.insert(bytes);
                Ok(PersistenceResult::Persisted)
            }
        }
    }
}
