//! Runtime configuration for shelf front ends.
//!
//! # Responsibility
//! - Resolve storage and logging settings from environment variables.
//! - Let callers override single fields (e.g. from CLI flags).
//!
//! # Invariants
//! - Blank environment values are treated as unset.
//! - `log_dir = None` means file logging stays disabled.

use crate::logging::default_log_level;
use std::path::PathBuf;

/// Environment variable overriding the storage database path.
pub const ENV_DB_PATH: &str = "BOOKSHELF_DB_PATH";
/// Environment variable overriding the log level.
pub const ENV_LOG_LEVEL: &str = "BOOKSHELF_LOG_LEVEL";
/// Environment variable enabling file logging in the given directory.
pub const ENV_LOG_DIR: &str = "BOOKSHELF_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "bookshelf.sqlite3";

/// Resolved settings for one shelf process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShelfConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl Default for ShelfConfig {
    fn default() -> Self {
        Self {
            db_path: std::env::temp_dir().join(DEFAULT_DB_FILE_NAME),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl ShelfConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, falling back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            db_path: read(ENV_DB_PATH)
                .map(PathBuf::from)
                .unwrap_or(defaults.db_path),
            log_level: read(ENV_LOG_LEVEL).unwrap_or(defaults.log_level),
            log_dir: read(ENV_LOG_DIR).map(PathBuf::from),
        }
    }

    pub fn with_db_path(mut self, db_path: Option<PathBuf>) -> Self {
        if let Some(path) = db_path {
            self.db_path = path;
        }
        self
    }

    pub fn with_log_level(mut self, level: Option<String>) -> Self {
        if let Some(level) = level {
            self.log_level = level;
        }
        self
    }

    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        if log_dir.is_some() {
            self.log_dir = log_dir;
        }
        self
    }
}
