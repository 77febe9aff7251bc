//! Wire format for the persisted shelf.
//!
//! # Responsibility
//! - Encode the whole book list as one JSON array string.
//! - Decode that string back into books without loss.
//!
//! # Invariants
//! - Every save overwrites the full array under [`STORAGE_KEY`].
//! - A stored JSON `null` decodes as "no books saved".

use crate::model::book::Book;

/// Storage key holding the serialized shelf.
pub const STORAGE_KEY: &str = "BOOKSHELF_APPS";

/// Serializes `books` in list order.
pub fn encode_books(books: &[Book]) -> serde_json::Result<String> {
    serde_json::to_string(books)
}

/// Parses a stored payload produced by [`encode_books`].
pub fn decode_books(payload: &str) -> serde_json::Result<Vec<Book>> {
    let books: Option<Vec<Book>> = serde_json::from_str(payload)?;
    Ok(books.unwrap_or_default())
}
