//! SQLite-backed local storage.
//!
//! # Invariants
//! - Reads and writes only touch the `local_storage` table.
//! - The connection is usable only when migrations created that table.

use super::{LocalStorage, StorageResult};
use crate::db::{open_db, open_db_in_memory, DbResult};
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const REQUIRED_TABLE: &str = "local_storage";

/// Durable key/value slot stored in a single SQLite table.
pub struct SqliteStorage {
    conn: Connection,
}

impl SqliteStorage {
    /// Opens (or creates) a storage file at `path`.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self::from_connection(open_db(path)?))
    }

    /// Opens a throwaway in-memory storage.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self::from_connection(open_db_in_memory()?))
    }

    /// Wraps an existing connection without running migrations.
    ///
    /// Availability is reported as `false` until the table exists.
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    fn table_exists(&self) -> rusqlite::Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1;",
                [REQUIRED_TABLE],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }
}

impl LocalStorage for SqliteStorage {
    fn is_available(&self) -> bool {
        match self.table_exists() {
            Ok(exists) => exists,
            Err(err) => {
                warn!("event=storage_probe module=storage status=error error={err}");
                false
            }
        }
    }

    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM local_storage WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO local_storage (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value;",
            params![key, value],
        )?;
        Ok(())
    }
}
