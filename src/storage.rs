//! Persistent Key-Value Storage
//!
//! Browser `localStorage` backend plus an in-memory backend for tests
//! and non-browser hosts.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

use wasm_bindgen::JsValue;

/// Storage key holding the JSON-encoded todo lists
pub const STORAGE_KEY: &str = "listTodo";

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level errors
#[derive(Debug, Clone, PartialEq)]
pub enum StorageError {
    /// No storage could be obtained (no window, storage disabled)
    Unavailable,
    /// The backend rejected the operation (quota, security error, ...)
    Access(String),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "Storage unavailable"),
            StorageError::Access(msg) => write!(f, "Storage access failed: {}", msg),
        }
    }
}

impl std::error::Error for StorageError {}

impl From<JsValue> for StorageError {
    fn from(value: JsValue) -> Self {
        StorageError::Access(js_error_message(&value))
    }
}

/// String-keyed storage with `localStorage` semantics
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;
    fn remove_item(&self, key: &str) -> StorageResult<()>;
}

/// `window.localStorage`
#[derive(Clone, Debug)]
pub struct BrowserStorage {
    inner: web_sys::Storage,
}

impl BrowserStorage {
    /// Local storage of the current window, if any
    pub fn local() -> Option<Self> {
        match Self::try_local() {
            Ok(storage) => Some(storage),
            Err(e) => {
                log::debug!("localStorage not available: {}", e);
                None
            }
        }
    }

    fn try_local() -> StorageResult<Self> {
        let window = web_sys::window().ok_or(StorageError::Unavailable)?;
        let inner = window.local_storage()?.ok_or(StorageError::Unavailable)?;
        Ok(Self { inner })
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.inner.get_item(key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        Ok(self.inner.set_item(key, value)?)
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        Ok(self.inner.remove_item(key)?)
    }
}

/// In-memory storage
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.borrow_mut().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> StorageResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Best-effort message from a thrown JS value
pub fn js_error_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
