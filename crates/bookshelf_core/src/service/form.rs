//! Create/edit form controller.
//!
//! # Invariants
//! - The form starts in `FormMode::Creating`.
//! - `FormMode::Editing` always carries the id of the book being edited.
//! - Resetting values never changes the mode.

use crate::model::book::{Book, BookId};

const CREATE_LABEL: &str = "Add book to shelf";
const EDIT_LABEL: &str = "Save changes";

/// Which action a form submission performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    #[default]
    Creating,
    Editing(BookId),
}

/// Raw form input as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    pub title: String,
    pub author: String,
    /// Unparsed; converted with [`crate::parse_year`] on submit.
    pub year: String,
    pub is_complete: bool,
}

impl FormValues {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        is_complete: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            is_complete,
        }
    }

    /// Prefills the form from an existing book.
    pub fn from_book(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            year: book.year_text(),
            is_complete: book.is_complete,
        }
    }
}

/// Form state shared by create and edit flows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookForm {
    mode: FormMode,
    values: FormValues,
}

impl BookForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    /// Id of the book under edit, if any.
    pub fn editing_id(&self) -> Option<BookId> {
        match self.mode {
            FormMode::Creating => None,
            FormMode::Editing(id) => Some(id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_id().is_some()
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn values_mut(&mut self) -> &mut FormValues {
        &mut self.values
    }

    pub fn set_values(&mut self, values: FormValues) {
        self.values = values;
    }

    /// Loads `book` into the form and targets it for editing.
    ///
    /// Re-targets when another edit is already in progress.
    pub fn start_editing(&mut self, book: &Book) {
        self.values = FormValues::from_book(book);
        self.mode = FormMode::Editing(book.id);
    }

    /// Returns to create mode, yielding the previous edit target.
    pub fn finish_editing(&mut self) -> Option<BookId> {
        let previous = self.editing_id();
        self.mode = FormMode::Creating;
        previous
    }

    /// Clears input values, keeping the mode.
    pub fn reset_values(&mut self) {
        self.values = FormValues::default();
    }

    /// Label of the submit control for the current mode.
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Creating => CREATE_LABEL,
            FormMode::Editing(_) => EDIT_LABEL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{BookForm, FormMode, FormValues};
    use crate::model::book::Book;

    #[test]
    fn form_starts_in_create_mode() {
        let form = BookForm::new();
        assert_eq!(form.mode(), FormMode::Creating);
        assert_eq!(form.editing_id(), None);
        assert_eq!(form.submit_label(), "Add book to shelf");
        assert_eq!(form.values(), &FormValues::default());
    }

    #[test]
    fn start_editing_prefills_and_retargets() {
        let dune = Book::new(1, "Dune", "Herbert", "1965", false);
        let emma = Book::new(2, "Emma", "Austen", "", true);
        let mut form = BookForm::new();

        form.start_editing(&dune);
        assert_eq!(form.mode(), FormMode::Editing(1));
        assert_eq!(form.values(), &FormValues::new("Dune", "Herbert", "1965", false));
        assert_eq!(form.submit_label(), "Save changes");

        form.start_editing(&emma);
        assert_eq!(form.mode(), FormMode::Editing(2));
        assert_eq!(form.values().year, "");
        assert!(form.values().is_complete);
    }

    #[test]
    fn reset_keeps_mode_and_finish_returns_target() {
        let dune = Book::new(1, "Dune", "Herbert", "1965", false);
        let mut form = BookForm::new();
        form.start_editing(&dune);

        form.reset_values();
        assert!(form.is_editing());
        assert_eq!(form.values(), &FormValues::default());

        assert_eq!(form.finish_editing(), Some(1));
        assert_eq!(form.mode(), FormMode::Creating);
        assert_eq!(form.finish_editing(), None);
    }
}
