//! LocalStorage-backed key-value store

use web_sys::Storage;

use super::dom::{js_error_message, window};
use crate::error::{GameError, Result};
use crate::persistence::KeyValueStore;

/// LocalStorage, or nothing when the browser refuses access (private
/// mode, sandboxed iframe). Every operation then fails and the profile
/// falls back to in-memory defaults.
pub struct LocalStore {
    storage: Option<Storage>,
}

impl LocalStore {
    pub fn open() -> Self {
        let storage = window()
            .ok()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable, progress will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| GameError::Storage("localStorage unavailable".into()))
    }
}

impl KeyValueStore for LocalStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| GameError::Storage(js_error_message(&e)))
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| GameError::Storage(js_error_message(&e)))
    }
}
