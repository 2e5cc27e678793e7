//! Durable storage for the note collection.
//!
//! # Responsibility
//! - Abstract the key-value medium (`KeyValueStorage`) behind a small trait.
//! - Persist the whole note collection as one serialized blob.
//!
//! # Invariants
//! - Writes overwrite the full stored value; there are no partial updates.
//! - Corrupt or unreadable stored data never surfaces as a load error.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod kv;
pub mod persistence;

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure while reading or writing the key-value medium.
#[derive(Debug)]
pub enum StorageError {
    /// SQLite backend failure.
    Db(DbError),
    /// Note collection could not be encoded.
    Serialize(serde_json::Error),
    /// Backend-specific failure without a structured source.
    Backend(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize notes: {err}"),
            Self::Backend(message) => write!(f, "storage backend failure: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Backend(_) => None,
        }
    }
}

impl From<DbError> for StorageError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}
