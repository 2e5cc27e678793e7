//! Note collection persistence over key-value storage.
//!
//! # Responsibility
//! - Load the whole collection from one storage key at startup.
//! - Overwrite the stored collection after every mutation.
//!
//! # Invariants
//! - `load()` never fails: missing, unreadable or unparsable data yields an
//!   empty collection.
//! - Loaded collections never contain duplicate ids or blank title/description.

use crate::model::note::Note;
use crate::storage::kv::KeyValueStorage;
use crate::storage::StorageResult;
use log::{debug, info, warn};
use std::collections::HashSet;

/// Storage key holding the serialized note collection.
pub const NOTES_STORAGE_KEY: &str = "notes";

/// Load/save contract used by the note store.
pub trait NotePersistence {
    /// Returns the persisted collection, or empty when nothing usable is stored.
    fn load(&self) -> Vec<Note>;
    /// Serializes and overwrites the full stored collection.
    fn save(&mut self, notes: &[Note]) -> StorageResult<()>;
    /// Drops the stored collection entirely.
    fn clear(&mut self) -> StorageResult<()>;
}

/// JSON-array persistence under a single key of a `KeyValueStorage`.
pub struct KeyValueNotePersistence<S: KeyValueStorage> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> KeyValueNotePersistence<S> {
    /// Uses the default `notes` key.
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, NOTES_STORAGE_KEY)
    }

    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Borrows the underlying medium.
    pub fn storage(&self) -> &S {
        &self.storage
    }

}

impl<S: KeyValueStorage> NotePersistence for KeyValueNotePersistence<S> {
    fn load(&self) -> Vec<Note> {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=notes_load module=storage status=empty key={}", self.key);
                return Vec::new();
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=storage status=error error_code=read_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        let parsed: Vec<Note> = match serde_json::from_str(&raw) {
            Ok(notes) => notes,
            Err(err) => {
                warn!(
                    "event=notes_load module=storage status=error error_code=parse_failed key={} error={}",
                    self.key, err
                );
                return Vec::new();
            }
        };

        let notes = repair(parsed);
        info!(
            "event=notes_load module=storage status=ok key={} count={}",
            self.key,
            notes.len()
        );
        notes
    }

    fn save(&mut self, notes: &[Note]) -> StorageResult<()> {
        let raw = serde_json::to_string(notes)?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(
            "event=notes_save module=storage status=ok key={} count={}",
            self.key,
            notes.len()
        );
        Ok(())
    }

    fn clear(&mut self) -> StorageResult<()> {
        self.storage.remove_item(&self.key)?;
        info!("event=notes_clear module=storage status=ok key={}", self.key);
        Ok(())
    }
}

// Drops entries that would break collection invariants if written back.
fn repair(notes: Vec<Note>) -> Vec<Note> {
    let total = notes.len();
    let mut blank = 0usize;
    let mut duplicates = 0usize;
    let mut seen = HashSet::with_capacity(total);
    let kept: Vec<Note> = notes
        .into_iter()
        .filter(|note| {
            if note.title.trim().is_empty() || note.description.trim().is_empty() {
                blank += 1;
                return false;
            }
            if !seen.insert(note.id.clone()) {
                duplicates += 1;
                return false;
            }
            true
        })
        .collect();
    if kept.len() != total {
        warn!(
            "event=notes_load module=storage status=repaired dropped_blank={blank} dropped_duplicates={duplicates}"
        );
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::{KeyValueNotePersistence, NotePersistence};
    use crate::storage::kv::{KeyValueStorage, MemoryStorage};

    #[test]
    fn duplicate_ids_keep_first_occurrence() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "notes",
                r#"[{"title":"a","description":"1","date":"d","id":"x"},
                    {"title":"b","description":"2","date":"d","id":"x"},
                    {"title":"c","description":"3","date":"d","id":"y"}]"#,
            )
            .unwrap();
        let persistence = KeyValueNotePersistence::new(storage);

        let loaded = persistence.load();
        let titles: Vec<&str> = loaded.iter().map(|note| note.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "c"]);
    }

    #[test]
    fn blank_title_or_description_is_dropped_on_load() {
        let mut storage = MemoryStorage::new();
        storage
            .set_item(
                "notes",
                r#"[{"title":"   ","description":"","date":"d","id":"z"},
                    {"title":"a","description":" \t","date":"d","id":"y"},
                    {"title":"kept","description":"body","date":"d","id":"x"}]"#,
            )
            .unwrap();
        let persistence = KeyValueNotePersistence::new(storage);

        let loaded = persistence.load();
        let ids: Vec<&str> = loaded.iter().map(|note| note.id.as_str()).collect();
        assert_eq!(ids, vec!["x"]);
    }

    #[test]
    fn custom_key_is_isolated_from_default() {
        let mut persistence = KeyValueNotePersistence::with_key(MemoryStorage::new(), "scratch");
        persistence.save(&[]).unwrap();
        assert_eq!(persistence.key(), "scratch");
        assert_eq!(persistence.storage().get_item("notes").unwrap(), None);
        assert_eq!(
            persistence.storage().get_item("scratch").unwrap().as_deref(),
            Some("[]")
        );
    }
}
