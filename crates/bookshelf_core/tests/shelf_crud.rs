use bookshelf_core::{
    BookAction, Bookshelf, Change, FormMode, FormValues, MemoryStorage, ShelfView, Submission,
};

fn shelf() -> Bookshelf<MemoryStorage> {
    Bookshelf::new(MemoryStorage::new())
}

fn values(title: &str, author: &str, year: &str, is_complete: bool) -> FormValues {
    FormValues::new(title, author, year, is_complete)
}

#[test]
fn add_places_book_in_incomplete_group() {
    let mut shelf = shelf();
    let id = shelf
        .add_book(&values("Dune", "Herbert", "1965", false))
        .unwrap();

    assert_eq!(shelf.books().len(), 1);
    let view = shelf.render(None);
    assert_eq!(view.incomplete.len(), 1);
    assert!(view.complete.is_empty());

    let card = &view.incomplete[0];
    assert_eq!(card.id, id);
    assert_eq!(card.title, "Dune");
    assert_eq!(card.author, "Herbert");
    assert_eq!(card.year, "1965");
    assert_eq!(card.toggle_action(), BookAction::MarkComplete);
}

#[test]
fn toggle_moves_book_between_groups() {
    let mut shelf = shelf();
    let id = shelf
        .add_book(&values("Dune", "Herbert", "1965", false))
        .unwrap();

    assert_eq!(shelf.toggle_complete(id, true).unwrap(), Change::Applied);
    let view = shelf.render(None);
    assert!(view.incomplete.is_empty());
    assert_eq!(view.complete.len(), 1);
    assert_eq!(view.complete[0].id, id);

    assert_eq!(shelf.mark_incomplete(id).unwrap(), Change::Applied);
    let view = shelf.render(None);
    assert_eq!(view.incomplete[0].id, id);
    assert!(view.complete.is_empty());
}

#[test]
fn toggle_complete_is_idempotent() {
    let mut shelf = shelf();
    let id = shelf
        .add_book(&values("Dune", "Herbert", "1965", false))
        .unwrap();

    shelf.toggle_complete(id, true).unwrap();
    shelf.toggle_complete(id, true).unwrap();

    assert_eq!(shelf.books().len(), 1);
    assert!(shelf.find_book(id).unwrap().is_complete);
}

#[test]
fn edit_updates_in_place_and_returns_to_create_mode() {
    let mut shelf = shelf();
    let id = shelf
        .add_book(&values("Dune", "Herbert", "1965", false))
        .unwrap();
    let other = shelf
        .add_book(&values("Emma", "Austen", "1815", true))
        .unwrap();

    assert_eq!(shelf.begin_edit(id), Change::Applied);
    assert_eq!(shelf.form().mode(), FormMode::Editing(id));
    assert_eq!(shelf.form().values(), &values("Dune", "Herbert", "1965", false));

    shelf.form_mut().values_mut().title = "Dune Messiah".to_string();
    shelf.form_mut().values_mut().year = "1969".to_string();
    assert_eq!(shelf.commit_edit().unwrap(), Change::Applied);

    let book = shelf.find_book(id).unwrap();
    assert_eq!(book.id, id);
    assert_eq!(book.title, "Dune Messiah");
    assert_eq!(book.year, Some(1969));
    assert_eq!(shelf.form().mode(), FormMode::Creating);

    let ids: Vec<_> = shelf.books().iter().map(|book| book.id).collect();
    assert_eq!(ids, vec![id, other]);
}

#[test]
fn begin_edit_retargets_previous_edit() {
    let mut shelf = shelf();
    let first = shelf.add_book(&values("A", "a", "1", false)).unwrap();
    let second = shelf.add_book(&values("B", "b", "2", false)).unwrap();

    shelf.begin_edit(first);
    shelf.begin_edit(second);
    assert_eq!(shelf.form().editing_id(), Some(second));

    shelf.form_mut().values_mut().title = "B2".to_string();
    assert_eq!(shelf.submit().unwrap(), Submission::Updated(second));
    assert_eq!(shelf.find_book(first).unwrap().title, "A");
    assert_eq!(shelf.find_book(second).unwrap().title, "B2");
}

#[test]
fn commit_edit_in_create_mode_is_noop() {
    let mut shelf = shelf();
    let id = shelf.add_book(&values("A", "a", "1", false)).unwrap();
    shelf.form_mut().set_values(values("changed", "x", "2", true));

    assert_eq!(shelf.commit_edit().unwrap(), Change::NotFound);
    assert_eq!(shelf.find_book(id).unwrap().title, "A");
}

#[test]
fn remove_unknown_id_leaves_list_unchanged() {
    let mut shelf = shelf();
    shelf.add_book(&values("A", "a", "1", false)).unwrap();
    shelf.add_book(&values("B", "b", "2", true)).unwrap();
    let before = shelf.books().clone();

    assert_eq!(shelf.remove_book(-1).unwrap(), Change::NotFound);
    assert_eq!(shelf.books(), &before);
}

#[test]
fn size_tracks_adds_minus_successful_removes() {
    let mut shelf = shelf();
    let mut ids = Vec::new();
    for n in 0..6 {
        ids.push(
            shelf
                .add_book(&values(&format!("Book {n}"), "a", "2000", n % 2 == 0))
                .unwrap(),
        );
    }

    let mut removed = 0;
    for id in [ids[1], ids[4], ids[1], 12345] {
        if shelf.remove_book(id).unwrap().is_applied() {
            removed += 1;
        }
    }

    assert_eq!(removed, 2);
    assert_eq!(shelf.books().len(), ids.len() - removed);
}

#[test]
fn ids_are_unique_for_rapid_adds() {
    let mut shelf = shelf();
    let mut ids: Vec<_> = (0..50)
        .map(|n| shelf.add_book(&values(&n.to_string(), "a", "1", false)).unwrap())
        .collect();
    let total = ids.len();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), total);
}

#[test]
fn non_numeric_year_is_stored_as_unknown() {
    let mut shelf = shelf();
    let id = shelf
        .add_book(&values("Mystery", "Anon", "circa 1900", false))
        .unwrap();
    assert_eq!(shelf.find_book(id).unwrap().year, None);
}

#[test]
fn search_is_case_insensitive_substring() {
    let mut shelf = shelf();
    let time = shelf
        .add_book(&values("A Brief History of Time", "Hawking", "1988", false))
        .unwrap();
    shelf.add_book(&values("Dune", "Herbert", "1965", true)).unwrap();

    let view: ShelfView = shelf.search("time");
    assert_eq!(view.len(), 1);
    assert_eq!(view.incomplete[0].id, time);

    let view = shelf.search("DUNE");
    assert_eq!(view.complete.len(), 1);
    assert!(view.incomplete.is_empty());
}
