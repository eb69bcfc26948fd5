//! Raw key-value storage capability

use std::collections::HashMap;

use crate::error::Result;

/// Durable string storage scoped to one profile
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key was never written
    fn load(&self, key: &str) -> Result<Option<String>>;
    /// Write a value
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Process-local store used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed a key (useful to simulate earlier sessions)
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }
}

impl KeyValueStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
