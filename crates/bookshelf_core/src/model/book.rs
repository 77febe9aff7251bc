//! Book domain model.
//!
//! # Responsibility
//! - Define the persisted book record and its wire field names.
//! - Parse free-form year input into the stored numeric shape.
//!
//! # Invariants
//! - `id` is assigned at creation and never rewritten by edits.
//! - Wire names are `id`, `title`, `author`, `year`, `isComplete`.
//! - An unparsable year is stored as `null`, never rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static YEAR_PREFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?[0-9]+)").expect("valid year prefix regex"));

/// Stable identifier for a book: creation time in epoch milliseconds.
pub type BookId = i64;

/// One book on the shelf together with its reading status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    /// `None` when the year input had no leading integer.
    pub year: Option<i64>,
    /// Routes the book into the "read" group when `true`.
    pub is_complete: bool,
}

impl Book {
    /// Creates a book record, parsing `year` with [`parse_year`].
    pub fn new(
        id: BookId,
        title: impl Into<String>,
        author: impl Into<String>,
        year: &str,
        is_complete: bool,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            year: parse_year(year),
            is_complete,
        }
    }

    /// Case-insensitive substring match on the title.
    ///
    /// `needle` is expected to be lowercased already; an empty needle
    /// matches every book.
    pub fn title_matches(&self, needle: &str) -> bool {
        needle.is_empty() || self.title.to_lowercase().contains(needle)
    }

    /// Display form of the year; empty when the year is unknown.
    pub fn year_text(&self) -> String {
        self.year.map(|year| year.to_string()).unwrap_or_default()
    }
}

/// Parses the leading integer of `input`.
///
/// Leading whitespace and an optional sign are accepted; anything after the
/// digit run is ignored. Returns `None` when no digits are present or when the
/// value does not fit in `i64`.
pub fn parse_year(input: &str) -> Option<i64> {
    let captures = YEAR_PREFIX_RE.captures(input)?;
    let digits = captures.get(1)?.as_str();
    digits.parse::<i64>().ok()
}
