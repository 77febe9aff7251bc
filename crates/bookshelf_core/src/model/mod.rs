//! Domain model for bookshelf records.
//!
//! # Responsibility
//! - Define the canonical book record persisted to local storage.
//! - Own identifier generation for newly created books.
//!
//! # Invariants
//! - A `BookId` never changes once assigned to a book.
//! - Ids handed out by one `IdGenerator` are strictly increasing.

pub mod book;
pub mod id;
