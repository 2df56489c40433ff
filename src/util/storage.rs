//! Key-value storage backends for persisted UI preferences.
//!
//! SYSTEM CONTEXT
//! ==============
//! The theme store writes through `KeyValueStore` so it can run against
//! `localStorage` in the browser and against `MemoryStorage` natively.
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. Callers receive `StorageError` values but the
//! theme store only logs them, keeping the in-memory value authoritative for
//! the session when storage is disabled or full.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::HashMap;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error returned by [`KeyValueStore`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// No storage area exists (non-browser target, disabled storage).
    #[error("storage unavailable")]
    Unavailable,
    /// The backend refused the write (quota exceeded, read-only area).
    #[error("storage rejected write: {0}")]
    Rejected(String),
    /// The value could not be serialized before writing.
    #[error("storage encode failed: {0}")]
    Encode(String),
}

/// Minimal string key-value contract shared by all backends.
pub trait KeyValueStore {
    /// Read the raw value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// `window.localStorage` backend.
///
/// Without the `csr` feature there is no browser, so every call reports
/// [`StorageError::Unavailable`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

#[cfg(feature = "csr")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .ok_or(StorageError::Unavailable)
}

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|_| StorageError::Unavailable)
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = key;
            Err(StorageError::Unavailable)
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "csr")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|e| StorageError::Rejected(format!("{e:?}")))
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = (key, value);
            Err(StorageError::Unavailable)
        }
    }
}

/// In-memory backend for tests and non-browser hosts. Nothing switches to it
/// automatically; callers pick it explicitly.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
    read_only: bool,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that serves reads but rejects every write.
    #[must_use]
    pub fn read_only() -> Self {
        Self { entries: RefCell::default(), read_only: true }
    }

    /// Seed `key` directly, bypassing the read-only flag.
    pub fn insert(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_owned(), value.to_owned());
    }

    /// Raw value currently held under `key`.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.raw(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if self.read_only {
            return Err(StorageError::Rejected("read-only storage".into()));
        }
        self.insert(key, value);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }
}

/// Load a JSON value stored under `key`.
///
/// Missing entries, unreadable storage, and malformed JSON all yield `None`.
pub fn load_json<T: DeserializeOwned>(storage: &impl KeyValueStore, key: &str) -> Option<T> {
    let raw = storage.get(key).ok().flatten()?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring malformed entry under {key}: {e}");
            None
        }
    }
}

/// Save a JSON value under `key`.
pub fn save_json<T: Serialize>(storage: &impl KeyValueStore, key: &str, value: &T) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Encode(e.to_string()))?;
    storage.set(key, &raw)
}
