//! Bookshelf application state and use-case operations.
//!
//! # Responsibility
//! - Own the book list, the form controller and the storage backend.
//! - Apply add/toggle/remove/edit operations and re-render after each one.
//! - Persist the full list after every successful mutation.
//!
//! # Invariants
//! - Lookup misses are silent no-ops returning `Change::NotFound`.
//! - Mutations render before they save, so observers see the new list even
//!   when the storage write fails.
//! - Missing storage raises one alert per attempt and never aborts in-memory
//!   changes.

use crate::events::{EventBus, ShelfEvent, ShelfObserver};
use crate::model::book::{parse_year, Book, BookId};
use crate::model::id::IdGenerator;
use crate::persistence::{decode_books, encode_books, STORAGE_KEY};
use crate::service::form::{BookForm, FormMode, FormValues};
use crate::storage::{LocalStorage, StorageError};
use crate::store::book_store::BookStore;
use crate::view::ShelfView;
use log::{debug, error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Message shown when the host provides no local storage.
pub const STORAGE_UNAVAILABLE_MESSAGE: &str = "Your environment does not support local storage";

pub type ShelfResult<T> = Result<T, ShelfError>;

/// Shelf operation failure.
#[derive(Debug)]
pub enum ShelfError {
    /// Storage backend failed while reading or writing.
    Storage(StorageError),
    /// The stored payload is not a valid shelf.
    CorruptData(serde_json::Error),
    /// The in-memory shelf could not be serialized.
    Encode(serde_json::Error),
    /// Every id above the largest existing one is taken.
    IdExhausted,
}

impl Display for ShelfError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::CorruptData(err) => {
                write!(f, "stored shelf under `{STORAGE_KEY}` is malformed: {err}")
            }
            Self::Encode(err) => write!(f, "failed to serialize shelf: {err}"),
            Self::IdExhausted => write!(f, "no book id left above {}", BookId::MAX),
        }
    }
}

impl Error for ShelfError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::CorruptData(err) => Some(err),
            Self::Encode(err) => Some(err),
            Self::IdExhausted => None,
        }
    }
}

impl From<StorageError> for ShelfError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// Outcome of an id-targeted operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Applied,
    /// No book carried the requested id; nothing happened.
    NotFound,
}

impl Change {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// Outcome of [`Bookshelf::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Added(BookId),
    Updated(BookId),
    /// The edit target no longer exists.
    Ignored,
}

/// Single-owner application state for one shelf.
pub struct Bookshelf<S: LocalStorage> {
    books: BookStore,
    storage: S,
    form: BookForm,
    ids: IdGenerator,
    events: EventBus,
}

impl<S: LocalStorage> Bookshelf<S> {
    /// Creates an empty shelf over `storage`. Call [`Bookshelf::load`] to
    /// restore persisted books.
    pub fn new(storage: S) -> Self {
        Self {
            books: BookStore::new(),
            storage,
            form: BookForm::new(),
            ids: IdGenerator::new(),
            events: EventBus::new(),
        }
    }

    /// Registers an observer for render/save/edit/alert events.
    pub fn subscribe(&mut self, observer: impl ShelfObserver + 'static) {
        self.events.subscribe(observer);
    }

    pub fn books(&self) -> &BookStore {
        &self.books
    }

    pub fn find_book(&self, id: BookId) -> Option<&Book> {
        self.books.find(id)
    }

    pub fn form(&self) -> &BookForm {
        &self.form
    }

    /// Mutable form access for UI input bindings.
    pub fn form_mut(&mut self) -> &mut BookForm {
        &mut self.form
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Probes the storage capability, alerting the user when it is missing.
    pub fn ensure_storage(&mut self) -> bool {
        if self.storage.is_available() {
            return true;
        }
        warn!("event=storage_check module=shelf status=error error_code=storage_unavailable");
        self.events.emit(&ShelfEvent::Alert {
            message: STORAGE_UNAVAILABLE_MESSAGE,
        });
        false
    }

    /// Restores persisted books, appending them after any in-memory ones.
    ///
    /// Returns `Ok(false)` without touching the list when storage is missing.
    /// Renders the shelf whenever storage is available.
    ///
    /// # Errors
    /// - `ShelfError::Storage` when the backend read fails.
    /// - `ShelfError::CorruptData` when the stored payload cannot be parsed.
    pub fn load(&mut self) -> ShelfResult<bool> {
        if !self.ensure_storage() {
            return Ok(false);
        }

        let loaded = match self.storage.get_item(STORAGE_KEY)? {
            Some(payload) => decode_books(&payload).map_err(|err| {
                error!("event=data_load module=shelf status=error error_code=corrupt_data error={err}");
                ShelfError::CorruptData(err)
            })?,
            None => Vec::new(),
        };

        let count = loaded.len();
        self.books.extend(loaded);
        if let Some(max_id) = self.books.max_id() {
            self.ids.observe(max_id);
        }
        info!("event=data_load module=shelf status=ok loaded={count} total={}", self.books.len());

        self.render(None);
        Ok(true)
    }

    /// Writes the full list under the storage key.
    ///
    /// Returns `Ok(false)` when storage is missing; the user is alerted.
    pub fn save(&mut self) -> ShelfResult<bool> {
        if !self.ensure_storage() {
            return Ok(false);
        }

        let payload = encode_books(self.books.as_slice()).map_err(ShelfError::Encode)?;
        if let Err(err) = self.storage.set_item(STORAGE_KEY, &payload) {
            error!("event=data_saved module=shelf status=error error={err}");
            return Err(err.into());
        }

        debug!(
            "event=data_saved module=shelf status=ok books={} bytes={}",
            self.books.len(),
            payload.len()
        );
        self.events.emit(&ShelfEvent::Saved { payload: &payload });
        Ok(true)
    }

    /// Rebuilds the view, optionally filtered by title, and notifies observers.
    pub fn render(&mut self, filter: Option<&str>) -> ShelfView {
        let view = ShelfView::build(self.books.iter(), filter);
        self.events.emit(&ShelfEvent::RenderRequested(&view));
        view
    }

    /// Renders only books whose title contains `title`, ignoring case.
    pub fn search(&mut self, title: &str) -> ShelfView {
        debug!("event=book_search module=shelf status=ok query_len={}", title.len());
        self.render(Some(title))
    }

    /// Creates a book from `values` with a fresh id and persists the shelf.
    ///
    /// The year is parsed leniently; non-numeric input is stored as unknown.
    ///
    /// # Errors
    /// - `ShelfError::IdExhausted` when the shelf already holds `BookId::MAX`;
    ///   the list is left untouched.
    pub fn add_book(&mut self, values: &FormValues) -> ShelfResult<BookId> {
        let Some(id) = self.ids.next_id() else {
            error!("event=book_add module=shelf status=error error_code=id_exhausted");
            return Err(ShelfError::IdExhausted);
        };
        let book = Book {
            id,
            title: values.title.clone(),
            author: values.author.clone(),
            year: parse_year(&values.year),
            is_complete: values.is_complete,
        };
        if book.year.is_none() {
            warn!("event=book_add module=shelf status=ok book_id={id} warning=year_unparsed");
        }
        self.books.add(book);
        info!(
            "event=book_add module=shelf status=ok book_id={id} is_complete={}",
            values.is_complete
        );

        self.commit_change()?;
        Ok(id)
    }

    /// Sets the completion status of `id` to `target`.
    ///
    /// Repeating the call with the same target leaves one unchanged entry.
    pub fn toggle_complete(&mut self, id: BookId, target: bool) -> ShelfResult<Change> {
        let Some(book) = self.books.find_mut(id) else {
            debug!("event=book_toggle module=shelf status=skip book_id={id} reason=not_found");
            return Ok(Change::NotFound);
        };
        book.is_complete = target;
        info!("event=book_toggle module=shelf status=ok book_id={id} is_complete={target}");

        self.commit_change()?;
        Ok(Change::Applied)
    }

    /// Moves `id` into the "read" group.
    pub fn mark_complete(&mut self, id: BookId) -> ShelfResult<Change> {
        self.toggle_complete(id, true)
    }

    /// Moves `id` back into the "not yet read" group.
    pub fn mark_incomplete(&mut self, id: BookId) -> ShelfResult<Change> {
        self.toggle_complete(id, false)
    }

    /// Deletes `id` from the shelf.
    ///
    /// Confirmation is the caller's job; see
    /// [`crate::view::delete_confirmation_prompt`]. Deleting the book under
    /// edit returns the form to create mode.
    pub fn remove_book(&mut self, id: BookId) -> ShelfResult<Change> {
        if self.books.remove(id).is_none() {
            debug!("event=book_remove module=shelf status=skip book_id={id} reason=not_found");
            return Ok(Change::NotFound);
        }
        if self.form.editing_id() == Some(id) {
            self.form.finish_editing();
            self.form.reset_values();
        }
        info!("event=book_remove module=shelf status=ok book_id={id}");

        self.commit_change()?;
        Ok(Change::Applied)
    }

    /// Loads `id` into the form and switches to edit mode.
    ///
    /// Emits `EditStarted` so the UI can bring the form into view.
    pub fn begin_edit(&mut self, id: BookId) -> Change {
        let Some(book) = self.books.find(id) else {
            debug!("event=edit_begin module=shelf status=skip book_id={id} reason=not_found");
            return Change::NotFound;
        };
        self.form.start_editing(book);
        info!("event=edit_begin module=shelf status=ok book_id={id}");

        self.events.emit(&ShelfEvent::EditStarted {
            book_id: id,
            form: self.form.values(),
        });
        Change::Applied
    }

    /// Overwrites the edit target with the current form values.
    ///
    /// No-op in create mode or when the target no longer exists.
    pub fn commit_edit(&mut self) -> ShelfResult<Change> {
        let FormMode::Editing(id) = self.form.mode() else {
            debug!("event=edit_commit module=shelf status=skip reason=not_editing");
            return Ok(Change::NotFound);
        };
        let Some(book) = self.books.find_mut(id) else {
            debug!("event=edit_commit module=shelf status=skip book_id={id} reason=not_found");
            return Ok(Change::NotFound);
        };

        let values = self.form.values();
        book.title = values.title.clone();
        book.author = values.author.clone();
        book.year = parse_year(&values.year);
        book.is_complete = values.is_complete;
        self.form.finish_editing();
        info!("event=edit_commit module=shelf status=ok book_id={id}");

        self.commit_change()?;
        Ok(Change::Applied)
    }

    /// Handles a form submission in the current mode, then clears the inputs.
    pub fn submit(&mut self) -> ShelfResult<Submission> {
        let submission = match self.form.mode() {
            FormMode::Creating => {
                let values = self.form.values().clone();
                Submission::Added(self.add_book(&values)?)
            }
            FormMode::Editing(id) => match self.commit_edit()? {
                Change::Applied => Submission::Updated(id),
                Change::NotFound => Submission::Ignored,
            },
        };
        self.form.reset_values();
        Ok(submission)
    }

    fn commit_change(&mut self) -> ShelfResult<()> {
        self.render(None);
        self.save()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Bookshelf, Change, ShelfError, Submission, STORAGE_UNAVAILABLE_MESSAGE};
    use crate::events::{ShelfEvent, ShelfObserver};
    use crate::persistence::STORAGE_KEY;
    use crate::service::form::{FormMode, FormValues};
    use crate::storage::{LocalStorage, MemoryStorage};
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Recorder {
        events: Rc<RefCell<Vec<String>>>,
    }

    impl ShelfObserver for Recorder {
        fn notify(&mut self, event: &ShelfEvent<'_>) {
            let entry = match event {
                ShelfEvent::RenderRequested(view) => format!("render:{}", view.len()),
                ShelfEvent::Saved { .. } => "saved".to_string(),
                ShelfEvent::EditStarted { book_id, .. } => format!("edit:{book_id}"),
                ShelfEvent::Alert { message } => format!("alert:{message}"),
            };
            self.events.borrow_mut().push(entry);
        }
    }

    fn dune() -> FormValues {
        FormValues::new("Dune", "Herbert", "1965", false)
    }

    #[test]
    fn add_renders_then_saves() {
        let recorder = Recorder::default();
        let mut shelf = Bookshelf::new(MemoryStorage::new());
        shelf.subscribe(recorder.clone());

        let id = shelf.add_book(&dune()).expect("add");
        assert_eq!(shelf.books().len(), 1);
        assert_eq!(shelf.find_book(id).map(|book| book.year), Some(Some(1965)));
        assert_eq!(*recorder.events.borrow(), vec!["render:1", "saved"]);
    }

    #[test]
    fn missed_lookups_do_not_render_or_save() {
        let recorder = Recorder::default();
        let mut shelf = Bookshelf::new(MemoryStorage::new());
        shelf.subscribe(recorder.clone());

        assert_eq!(shelf.toggle_complete(42, true).expect("toggle"), Change::NotFound);
        assert_eq!(shelf.remove_book(42).expect("remove"), Change::NotFound);
        assert_eq!(shelf.begin_edit(42), Change::NotFound);
        assert_eq!(shelf.commit_edit().expect("commit"), Change::NotFound);
        assert!(recorder.events.borrow().is_empty());
        assert_eq!(shelf.form().mode(), FormMode::Creating);
    }

    #[test]
    fn unavailable_storage_alerts_and_keeps_memory_changes() {
        let recorder = Recorder::default();
        let mut shelf = Bookshelf::new(MemoryStorage::unavailable());
        shelf.subscribe(recorder.clone());

        assert!(!shelf.load().expect("load reports unavailability"));
        let id = shelf.add_book(&dune()).expect("add still succeeds");
        assert!(shelf.find_book(id).is_some());

        let alert = format!("alert:{STORAGE_UNAVAILABLE_MESSAGE}");
        assert_eq!(
            *recorder.events.borrow(),
            vec![alert.clone(), "render:1".to_string(), alert]
        );
    }

    #[test]
    fn load_rejects_corrupt_payload() {
        let storage = MemoryStorage::new().with_item(STORAGE_KEY, "{oops");
        let mut shelf = Bookshelf::new(storage);
        let err = shelf.load().expect_err("corrupt payload must fail");
        assert!(matches!(err, ShelfError::CorruptData(_)));
        assert!(shelf.books().is_empty());
    }

    #[test]
    fn new_ids_follow_loaded_ids() {
        let storage = MemoryStorage::new().with_item(
            STORAGE_KEY,
            r#"[{"id":99999999999999,"title":"Future","author":"X","year":3000,"isComplete":false}]"#,
        );
        let mut shelf = Bookshelf::new(storage);
        assert!(shelf.load().expect("load"));

        let id = shelf.add_book(&dune()).expect("add");
        assert_eq!(id, 99_999_999_999_999 + 1);
    }

    #[test]
    fn add_after_max_id_fails_without_duplicating() {
        let storage = MemoryStorage::new().with_item(
            STORAGE_KEY,
            r#"[{"id":9223372036854775807,"title":"Last","author":"X","year":1,"isComplete":false}]"#,
        );
        let mut shelf = Bookshelf::new(storage);
        assert!(shelf.load().expect("load"));

        let err = shelf.add_book(&dune()).expect_err("id space exhausted");
        assert!(matches!(err, ShelfError::IdExhausted));
        assert_eq!(shelf.books().len(), 1);
        assert_eq!(shelf.books().find_index(i64::MAX), Some(0));
    }

    #[test]
    fn submit_dispatches_on_mode_and_resets_inputs() {
        let mut shelf = Bookshelf::new(MemoryStorage::new());
        shelf.form_mut().set_values(dune());
        let Submission::Added(id) = shelf.submit().expect("create submit") else {
            panic!("expected an add");
        };
        assert_eq!(shelf.form().values(), &FormValues::default());

        assert_eq!(shelf.begin_edit(id), Change::Applied);
        shelf.form_mut().values_mut().title = "Dune Messiah".to_string();
        assert_eq!(shelf.submit().expect("edit submit"), Submission::Updated(id));
        assert_eq!(shelf.form().mode(), FormMode::Creating);
        assert_eq!(shelf.form().values(), &FormValues::default());
        assert_eq!(
            shelf.find_book(id).map(|book| book.title.as_str()),
            Some("Dune Messiah")
        );
    }

    #[test]
    fn removing_edit_target_returns_form_to_create_mode() {
        let mut shelf = Bookshelf::new(MemoryStorage::new());
        let id = shelf.add_book(&dune()).expect("add");
        shelf.begin_edit(id);

        assert_eq!(shelf.remove_book(id).expect("remove"), Change::Applied);
        assert_eq!(shelf.form().mode(), FormMode::Creating);
        assert!(shelf.storage().is_available());
    }
}
