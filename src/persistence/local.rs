//! Browser LocalStorage store (wasm32 only)

use web_sys::Storage;

use super::{IntegerStore, StoreError};

/// Integer store backed by `window.localStorage`
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore {
    /// Prefix added to every key
    prefix: String,
}

impl LocalStorageStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn storage() -> Result<Storage, StoreError> {
        web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window".to_string()))?
            .local_storage()
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?
            .ok_or_else(|| StoreError::Unavailable("localStorage disabled".to_string()))
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

impl IntegerStore for LocalStorageStore {
    fn get_integer(&self, key: &str) -> Result<i64, StoreError> {
        let storage = Self::storage()?;
        let raw = storage
            .get_item(&self.full_key(key))
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        match raw {
            Some(text) => text
                .trim()
                .parse()
                .map_err(|e| StoreError::Decode(format!("{key}: {e}"))),
            None => Ok(0),
        }
    }

    fn set_integer(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let storage = Self::storage()?;
        storage
            .set_item(&self.full_key(key), &value.to_string())
            .map_err(|e| StoreError::Unavailable(format!("{:?}", e)))?;
        log::info!("Saved {}={} to LocalStorage", key, value);
        Ok(())
    }
}
