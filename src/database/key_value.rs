//! String-keyed persistent store shared by the page components.
//!
//! Values are JSON text. Each write overwrites its key in full.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::{SystemTime, UNIX_EPOCH};

use rusqlite::{params, OptionalExtension};
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::connection::Database;
use crate::types::errors::StoreError;

/// Keys forming the on-disk contract of the page.
pub mod keys {
    /// JSON array holding the root node of the cached tree.
    pub const BOOKMARKS: &str = "bookmarks";
    /// JSON integer: `captured_at` of the cached tree.
    pub const DATE_OF_LAST_BOOKMARK: &str = "dateOfLastBookmark";
    /// JSON array of expanded folder IDs.
    pub const OPEN_FOLDER: &str = "openFolder";
    /// `0` or `1`; owned by the theme toggle, never written here.
    pub const PREFERS_COLOR_SCHEME: &str = "prefersColorScheme";
}

/// Durable synchronous string store.
///
/// Methods take `&self` so a single store can be shared through `Rc` by every
/// component of the page.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn clear(&self, key: &str) -> Result<(), StoreError>;
}

/// Shared handle to a store.
pub type SharedStore = Rc<dyn KeyValueStore>;

/// Reads `key` and parses it as JSON.
///
/// Returns `Ok(None)` when the key is absent and
/// `Err(StoreError::SerializationError)` when the stored text does not parse.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key)? {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| StoreError::SerializationError(format!("{}: {}", key, e))),
        None => Ok(None),
    }
}

/// Serializes `value` as JSON and writes it under `key`.
pub fn set_json<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let text = serde_json::to_string(value)
        .map_err(|e| StoreError::SerializationError(format!("{}: {}", key, e)))?;
    store.set(key, &text)
}

impl KeyValueStore for Database {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .connection()
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs() as i64;
        self.connection().execute(
            "INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
            params![key, value, now],
        )?;
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.connection()
            .execute("DELETE FROM kv_store WHERE key = ?1", params![key])?;
        Ok(())
    }
}

/// Volatile store, used by tests and by callers without a database.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    writes: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys written so far, in write order (one entry per `set`).
    pub fn write_log(&self) -> Vec<String> {
        self.writes.borrow().clone()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.borrow_mut().push(key.to_string());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), StoreError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}
