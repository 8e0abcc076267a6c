//! Persistence adapter contracts for the records mirror.
//!
//! # Responsibility
//! - Define the key-value facility the store mirrors its collections to.
//! - Provide an in-memory adapter for tests and ephemeral sessions.
//!
//! # Invariants
//! - The store is the sole reader and writer of the two well-known keys.
//! - Values are whole serialized collections; adapters never see partial
//!   or delta updates.

use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

/// Mirror key holding the serialized client collection.
pub const CLIENTS_KEY: &str = "cema-clients";
/// Mirror key holding the serialized program collection.
pub const PROGRAMS_KEY: &str = "cema-programs";

pub type StorageResult<T> = Result<T, StorageError>;

/// Failure reading from or writing to a persistence adapter.
#[derive(Debug)]
pub enum StorageError {
    Sqlite(rusqlite::Error),
    Serialization(String),
    Unavailable(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Serialization(message) => {
                write!(f, "failed to serialize collection: {message}")
            }
            Self::Unavailable(message) => write!(f, "storage unavailable: {message}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Serialization(_) => None,
            Self::Unavailable(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value facility the records store mirrors into.
///
/// Whole string values under stable keys. Removing a key is distinct
/// from writing an empty value; `initialize` re-seeds only on absence.
pub trait StorageAdapter {
    fn get(&self, key: &str) -> StorageResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;
    fn remove(&mut self, key: &str) -> StorageResult<()>;
}

/// In-memory adapter for tests and ephemeral sessions.
///
/// `fail_writes` lets tests exercise the store's persist-failure channel
/// without a real quota error.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `set`/`remove` fail, simulating storage
    /// that has become read-only (quota exceeded, storage disabled).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageAdapter for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(
                "memory storage is rejecting writes".to_string(),
            ));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        if self.fail_writes {
            return Err(StorageError::Unavailable(
                "memory storage is rejecting writes".to_string(),
            ));
        }
        self.entries.remove(key);
        Ok(())
    }
}
