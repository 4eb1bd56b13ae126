use super::{KeyValueStore, StorageKey};
use crate::error::Result;
use std::collections::HashMap;

/// Map-backed storage; nothing outlives the value.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStore {
    values: HashMap<StorageKey, String>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: StorageKey, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn raw(&self, key: StorageKey) -> Option<&str> {
        self.values.get(&key).map(String::as_str)
    }
}

impl KeyValueStore for InMemoryStore {
    fn load(&self, key: StorageKey) -> Result<Option<String>> {
        Ok(self.values.get(&key).cloned())
    }

    fn save(&mut self, key: StorageKey, value: &str) -> Result<()> {
        self.values.insert(key, value.to_string());
        Ok(())
    }
}
