use std::sync::Arc;

use dashmap::DashMap;

use crate::{errors::AppError, repositories::store::KeyValueStore};

/// Process-local store. Clones share the same underlying map, so one store
/// can back several handlers in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    map: Arc<DashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.get(key).map(|entry| entry.value().clone())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), AppError> {
        self.map.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
