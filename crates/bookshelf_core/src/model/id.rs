//! Book identifier generation.
//!
//! Ids are epoch-millisecond timestamps. Two books created inside the same
//! millisecond would share a timestamp, so the generator bumps past the last
//! issued id instead. Once `i64::MAX` has been issued or observed, no further
//! id can be handed out.

use crate::model::book::BookId;
use std::time::{SystemTime, UNIX_EPOCH};

/// Hands out strictly increasing, timestamp-shaped book ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: Option<BookId>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next id using the current wall clock.
    ///
    /// Returns `None` when the id space is exhausted.
    pub fn next_id(&mut self) -> Option<BookId> {
        self.next_at(now_epoch_ms())
    }

    /// Returns the next id given an explicit clock reading.
    pub fn next_at(&mut self, now_ms: i64) -> Option<BookId> {
        let id = match self.last {
            Some(last) if now_ms <= last => last.checked_add(1)?,
            _ => now_ms,
        };
        self.last = Some(id);
        Some(id)
    }

    /// Ensures future ids are greater than `id`.
    ///
    /// Used after loading persisted books so new ids never collide with them.
    pub fn observe(&mut self, id: BookId) {
        if self.last.map_or(true, |last| id > last) {
            self.last = Some(id);
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
