//! Presentation model for the shelf.
//!
//! # Responsibility
//! - Split books into "unread" and "read" groups for display.
//! - Apply the case-insensitive title filter used by search.
//! - Describe per-book action controls without binding to a UI toolkit.
//!
//! # Invariants
//! - Cards keep store order inside each group.
//! - Views are rebuilt from scratch on every render; no diffing.

pub mod text;

use crate::model::book::{Book, BookId};

pub use text::{delete_confirmation_prompt, render_text};

/// Action control attached to a rendered book.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookAction {
    /// Move an unread book to the read group.
    MarkComplete,
    /// Move a read book back to the unread group.
    MarkIncomplete,
    /// Delete after user confirmation.
    Delete,
    /// Load the book into the form for editing.
    Edit,
}

impl BookAction {
    /// User-facing control label.
    pub fn label(self) -> &'static str {
        match self {
            Self::MarkComplete => "Mark as read",
            Self::MarkIncomplete => "Mark as unread",
            Self::Delete => "Delete book",
            Self::Edit => "Edit book",
        }
    }
}

/// Display element for one book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookCard {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// Empty when the stored year is unknown.
    pub year: String,
    pub is_complete: bool,
    /// Controls in display order: toggle, delete, edit.
    pub actions: [BookAction; 3],
}

impl BookCard {
    pub fn from_book(book: &Book) -> Self {
        let toggle = if book.is_complete {
            BookAction::MarkIncomplete
        } else {
            BookAction::MarkComplete
        };
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year_text(),
            is_complete: book.is_complete,
            actions: [toggle, BookAction::Delete, BookAction::Edit],
        }
    }

    /// The completion toggle shown for this card.
    pub fn toggle_action(&self) -> BookAction {
        self.actions[0]
    }
}

/// Fully built shelf display, grouped by completion status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShelfView {
    /// Lowercased filter that was applied, if any.
    pub filter: Option<String>,
    pub incomplete: Vec<BookCard>,
    pub complete: Vec<BookCard>,
}

impl ShelfView {
    /// Builds the view for `books`, keeping titles that match `filter`.
    ///
    /// A blank filter is treated as no filter.
    pub fn build<'a>(books: impl IntoIterator<Item = &'a Book>, filter: Option<&str>) -> Self {
        let filter = filter
            .map(str::to_lowercase)
            .filter(|needle| !needle.is_empty());
        let mut view = Self {
            filter,
            ..Self::default()
        };

        for book in books {
            if let Some(needle) = view.filter.as_deref() {
                if !book.title_matches(needle) {
                    continue;
                }
            }
            let card = BookCard::from_book(book);
            if book.is_complete {
                view.complete.push(card);
            } else {
                view.incomplete.push(card);
            }
        }

        view
    }

    pub fn len(&self) -> usize {
        self.incomplete.len() + self.complete.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Looks up a rendered card in either group.
    pub fn card(&self, id: BookId) -> Option<&BookCard> {
        self.incomplete
            .iter()
            .chain(self.complete.iter())
            .find(|card| card.id == id)
    }
}
