//! Key/value persistence behind the filter store.
//!
//! `BrowserStorage` talks to `window.localStorage`; `MemoryStorage` keeps everything in a
//! map and is used in tests and when the browser refuses to hand out `localStorage`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;
use web_sys::window;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StorageError {
    #[error("local storage is not available")]
    Unavailable,
    #[error("failed to read key '{0}'")]
    Read(String),
    #[error("failed to write key '{0}'")]
    Write(String),
    #[error("failed to serialize snapshot: {0}")]
    Serialize(String),
}

pub trait KeyValueStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// `window.localStorage`. The handle is looked up on every call, so the type stays `Send`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn get_local_storage() -> Result<web_sys::Storage, StorageError> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl BrowserStorage {
    pub fn is_available() -> bool {
        get_local_storage().is_ok()
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        get_local_storage()?
            .get_item(key)
            .map_err(|_| StorageError::Read(key.to_string()))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        // QuotaExceededError и приватный режим приходят сюда как Err
        get_local_storage()?
            .set_item(key, value)
            .map_err(|_| StorageError::Write(key.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        get_local_storage()?
            .remove_item(key)
            .map_err(|_| StorageError::Write(key.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let items = self
            .items
            .lock()
            .map_err(|_| StorageError::Read(key.to_string()))?;
        Ok(items.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Write(key.to_string()))?;
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut items = self
            .items
            .lock()
            .map_err(|_| StorageError::Write(key.to_string()))?;
        items.remove(key);
        Ok(())
    }
}

/// Browser storage when it is reachable, otherwise an in-memory map (state then lives
/// only until reload).
pub fn default_storage() -> Arc<dyn KeyValueStorage> {
    if BrowserStorage::is_available() {
        Arc::new(BrowserStorage)
    } else {
        log::warn!("localStorage unavailable, filter state will not survive reload");
        Arc::new(MemoryStorage::new())
    }
}
