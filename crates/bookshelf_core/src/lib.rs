//! Core domain logic for the bookshelf manager.
//! This crate owns every book invariant; front ends only render and collect input.

pub mod config;
pub mod db;
pub mod events;
pub mod logging;
pub mod model;
pub mod persistence;
pub mod service;
pub mod storage;
pub mod store;
pub mod view;

pub use config::ShelfConfig;
pub use events::{EventBus, ShelfEvent, ShelfObserver};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::book::{parse_year, Book, BookId};
pub use model::id::IdGenerator;
pub use persistence::{decode_books, encode_books, STORAGE_KEY};
pub use service::form::{BookForm, FormMode, FormValues};
pub use service::shelf_service::{
    Bookshelf, Change, ShelfError, ShelfResult, Submission, STORAGE_UNAVAILABLE_MESSAGE,
};
pub use storage::{LocalStorage, MemoryStorage, SqliteStorage, StorageError, StorageResult};
pub use store::book_store::BookStore;
pub use view::{delete_confirmation_prompt, render_text, BookAction, BookCard, ShelfView};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
