//! Shelf notifications for presentation layers.
//!
//! # Responsibility
//! - Describe what a UI must react to after shelf state changes.
//! - Fan events out synchronously to registered observers.
//!
//! # Invariants
//! - Observers are notified in subscription order.
//! - Delivery is synchronous; an event is fully handled before `emit` returns.

use crate::model::book::BookId;
use crate::service::form::FormValues;
use crate::view::ShelfView;

/// Notification emitted by [`crate::Bookshelf`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShelfEvent<'a> {
    /// The shelf was rebuilt and should be redrawn.
    RenderRequested(&'a ShelfView),
    /// The full shelf was written to storage. Diagnostic only.
    Saved { payload: &'a str },
    /// A book was loaded into the form; the UI should bring the form into view.
    EditStarted { book_id: BookId, form: &'a FormValues },
    /// Blocking message for the user.
    Alert { message: &'a str },
}

impl ShelfEvent<'_> {
    /// Stable event name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RenderRequested(_) => "render_requested",
            Self::Saved { .. } => "data_saved",
            Self::EditStarted { .. } => "edit_started",
            Self::Alert { .. } => "alert",
        }
    }
}

/// Receiver for shelf events.
pub trait ShelfObserver {
    fn notify(&mut self, event: &ShelfEvent<'_>);
}

/// Ordered list of observers owned by one shelf.
#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn ShelfObserver>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: impl ShelfObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    pub fn emit(&mut self, event: &ShelfEvent<'_>) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
