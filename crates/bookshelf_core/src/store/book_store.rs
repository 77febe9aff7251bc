//! Ordered book list with linear id lookups.
//!
//! A personal shelf holds tens to hundreds of books, so every lookup is a
//! plain scan over the backing `Vec`.

use crate::model::book::{Book, BookId};

/// Ordered, in-memory list of books.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookStore {
    books: Vec<Book>,
}

impl BookStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `book` after every existing book.
    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Appends all `books` in iteration order.
    pub fn extend(&mut self, books: impl IntoIterator<Item = Book>) {
        self.books.extend(books);
    }

    /// Returns the first book with `id`.
    pub fn find(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|book| book.id == id)
    }

    /// Mutable variant of [`BookStore::find`].
    pub fn find_mut(&mut self, id: BookId) -> Option<&mut Book> {
        self.books.iter_mut().find(|book| book.id == id)
    }

    /// Returns the position of the first book with `id`.
    pub fn find_index(&self, id: BookId) -> Option<usize> {
        self.books.iter().position(|book| book.id == id)
    }

    /// Removes the first book with `id` and returns it.
    ///
    /// Returns `None` and leaves the list untouched when `id` is unknown.
    pub fn remove(&mut self, id: BookId) -> Option<Book> {
        let index = self.find_index(id)?;
        Some(self.books.remove(index))
    }

    pub fn as_slice(&self) -> &[Book] {
        &self.books
    }

    pub fn iter(&self) -> impl Iterator<Item = &Book> {
        self.books.iter()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    /// Largest id currently stored.
    pub fn max_id(&self) -> Option<BookId> {
        self.books.iter().map(|book| book.id).max()
    }
}
