//! In-memory book storage.
//!
//! # Responsibility
//! - Hold the ordered list of books owned by one shelf.
//! - Provide id lookups used by every mutation path.
//!
//! # Invariants
//! - Insertion order is display order within each completion group.
//! - Lookups return the first match; the store never reorders books.

pub mod book_store;
