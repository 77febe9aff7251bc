//! Key/value storage capability used for shelf persistence.
//!
//! # Responsibility
//! - Model the host "local storage" slot as a string-keyed string store.
//! - Provide durable (SQLite) and volatile (memory) backends.
//!
//! # Invariants
//! - `set_item` fully overwrites the previous value for a key.
//! - Callers must check `is_available()` before relying on reads or writes.

use crate::db::DbError;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod sqlite;

pub use sqlite::SqliteStorage;

pub type StorageResult<T> = Result<T, StorageError>;

/// Storage backend failure.
#[derive(Debug)]
pub enum StorageError {
    /// The backend reports the capability as missing.
    Unavailable,
    Db(DbError),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "local storage is not available"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Unavailable => None,
            Self::Db(err) => Some(err),
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

/// String key/value slot provided by the host environment.
pub trait LocalStorage {
    /// Whether the host actually provides this capability.
    fn is_available(&self) -> bool;
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;
    /// Stores `value` under `key`, replacing any previous value.
    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

impl<S: LocalStorage + ?Sized> LocalStorage for Box<S> {
    fn is_available(&self) -> bool {
        (**self).is_available()
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }
}

/// Volatile storage backed by a `HashMap`.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
    available: bool,
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            available: true,
        }
    }

    /// Storage that reports the capability as missing.
    pub fn unavailable() -> Self {
        Self {
            items: HashMap::new(),
            available: false,
        }
    }

    /// Pre-populates `key` regardless of availability.
    pub fn with_item(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.items.insert(key.into(), value.into());
        self
    }
}

impl LocalStorage for MemoryStorage {
    fn is_available(&self) -> bool {
        self.available
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        if !self.available {
            return Err(StorageError::Unavailable);
        }
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{LocalStorage, MemoryStorage, StorageError};

    #[test]
    fn memory_storage_overwrites_values() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").expect("read"), None);

        storage.set_item("k", "one").expect("first write");
        storage.set_item("k", "two").expect("second write");
        assert_eq!(storage.get_item("k").expect("read").as_deref(), Some("two"));
    }

    #[test]
    fn unavailable_memory_storage_rejects_io() {
        let mut storage = MemoryStorage::unavailable().with_item("k", "v");
        assert!(!storage.is_available());
        assert!(matches!(
            storage.get_item("k"),
            Err(StorageError::Unavailable)
        ));
        assert!(matches!(
            storage.set_item("k", "v"),
            Err(StorageError::Unavailable)
        ));
    }
}
