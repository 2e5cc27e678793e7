//! Key-value storage backends.
//!
//! # Responsibility
//! - Provide a `get_item`/`set_item`/`remove_item` contract shaped like
//!   browser local storage.
//! - Offer an in-memory backend and a SQLite-backed durable backend.
//!
//! # Invariants
//! - `set_item` replaces any previous value for the key.
//! - Removing an absent key is not an error.

use crate::db::{open_db, open_db_in_memory};
use crate::storage::{StorageError, StorageResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::path::Path;

/// String key-value medium holding serialized application state.
pub trait KeyValueStorage {
    /// Returns the value stored for `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
    /// Removes the value stored under `key`.
    fn remove_item(&mut self, key: &str) -> StorageResult<()>;
}

/// Process-local storage; contents are lost when dropped.
///
/// An optional quota caps the summed byte length of keys and values,
/// mirroring the size limit of browser local storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: BTreeMap<String, String>,
    quota_bytes: Option<usize>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage rejecting writes that would exceed `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            items: BTreeMap::new(),
            quota_bytes: Some(quota_bytes),
        }
    }

    fn used_bytes_without(&self, key: &str) -> usize {
        self.items
            .iter()
            .filter(|(existing, _)| existing.as_str() != key)
            .map(|(existing, value)| existing.len() + value.len())
            .sum()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = self.quota_bytes {
            let needed = self.used_bytes_without(key) + key.len() + value.len();
            if needed > quota {
                return Err(StorageError::Backend(format!(
                    "quota exceeded: {needed} of {quota} bytes"
                )));
            }
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

/// SQLite-backed durable storage using the `kv_store` table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (and migrates) a database file at `path`.
    pub fn open(path: impl AsRef<Path>) -> StorageResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a migrated in-memory database.
    pub fn open_in_memory() -> StorageResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }
}

impl KeyValueStorage for SqliteStorage {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyValueStorage, MemoryStorage, SqliteStorage};
    use crate::storage::StorageError;

    fn exercise(storage: &mut dyn KeyValueStorage) {
        assert_eq!(storage.get_item("notes").unwrap(), None);
        storage.set_item("notes", "[]").unwrap();
        storage.set_item("notes", "[1]").unwrap();
        assert_eq!(storage.get_item("notes").unwrap().as_deref(), Some("[1]"));
        storage.remove_item("notes").unwrap();
        storage.remove_item("notes").unwrap();
        assert_eq!(storage.get_item("notes").unwrap(), None);
    }

    #[test]
    fn memory_storage_overwrites_and_removes() {
        exercise(&mut MemoryStorage::new());
    }

    #[test]
    fn memory_quota_rejects_oversized_write_and_keeps_old_value() {
        let mut storage = MemoryStorage::with_quota(16);
        storage.set_item("notes", "[1,2]").unwrap();
        let err = storage.set_item("notes", "[1,2,3,4,5,6]").unwrap_err();
        assert!(matches!(err, StorageError::Backend(_)));
        assert_eq!(storage.get_item("notes").unwrap().as_deref(), Some("[1,2]"));
        storage.set_item("notes", "[1,2,3]").unwrap();
    }

    #[test]
    fn sqlite_storage_overwrites_and_removes() {
        exercise(&mut SqliteStorage::open_in_memory().unwrap());
    }
}
