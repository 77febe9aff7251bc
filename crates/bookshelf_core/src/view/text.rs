//! Plain-text renderer for terminals and logs.

use super::{BookCard, ShelfView};
use crate::model::book::Book;
use std::fmt::Write;

const INCOMPLETE_HEADING: &str = "Not yet read";
const COMPLETE_HEADING: &str = "Finished reading";

/// Renders both groups as indented text blocks.
pub fn render_text(view: &ShelfView) -> String {
    let mut out = String::new();
    if let Some(filter) = view.filter.as_deref() {
        let _ = writeln!(out, "Search: \"{filter}\"");
        out.push('\n');
    }
    write_section(&mut out, INCOMPLETE_HEADING, &view.incomplete);
    out.push('\n');
    write_section(&mut out, COMPLETE_HEADING, &view.complete);
    out
}

/// Question asked before a book is deleted.
pub fn delete_confirmation_prompt(book: &Book) -> String {
    format!(
        "Are you sure you want to delete \"{}\" by {}?",
        book.title, book.author
    )
}

fn write_section(out: &mut String, heading: &str, cards: &[BookCard]) {
    let _ = writeln!(out, "== {heading} ({}) ==", cards.len());
    if cards.is_empty() {
        out.push_str("  (empty)\n");
        return;
    }
    for card in cards {
        let _ = writeln!(out, "  [{}] {}", card.id, card.title);
        let _ = writeln!(out, "      Author: {}", card.author);
        let _ = writeln!(out, "      Year: {}", card.year);
        let labels: Vec<_> = card.actions.iter().map(|action| action.label()).collect();
        let _ = writeln!(out, "      Actions: {}", labels.join(" | "));
    }
}

#[cfg(test)]
mod tests {
    use super::{delete_confirmation_prompt, render_text};
    use crate::model::book::Book;
    use crate::view::ShelfView;

    #[test]
    fn render_text_lists_books_under_their_group() {
        let books = vec![
            Book::new(10, "Dune", "Herbert", "1965", false),
            Book::new(11, "Emma", "Austen", "1815", true),
        ];
        let text = render_text(&ShelfView::build(&books, None));

        let unread_at = text.find("== Not yet read (1) ==").expect("unread heading");
        let read_at = text.find("== Finished reading (1) ==").expect("read heading");
        let dune_at = text.find("[10] Dune").expect("dune line");
        let emma_at = text.find("[11] Emma").expect("emma line");
        assert!(unread_at < dune_at && dune_at < read_at && read_at < emma_at);
        assert!(text.contains("Mark as read | Delete book | Edit book"));
        assert!(text.contains("Mark as unread | Delete book | Edit book"));
    }

    #[test]
    fn render_text_marks_empty_groups_and_filter() {
        let empty: Vec<Book> = Vec::new();
        let text = render_text(&ShelfView::build(&empty, Some("Dune")));
        assert!(text.starts_with("Search: \"dune\""));
        assert_eq!(text.matches("(empty)").count(), 2);
    }

    #[test]
    fn delete_prompt_names_the_book() {
        let book = Book::new(1, "Dune", "Herbert", "1965", false);
        assert_eq!(
            delete_confirmation_prompt(&book),
            "Are you sure you want to delete \"Dune\" by Herbert?"
        );
    }
}
