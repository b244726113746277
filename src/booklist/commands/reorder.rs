//! Drag-and-drop style moves.
//!
//! [`run`] works on zero-based indices into the **full** collection. Callers showing a
//! filtered or paged view must not pass view positions to it; [`run_visible`] does that
//! translation by looking up the full-collection positions of the books involved.

use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BooklistError, Result};
use crate::model::Book;
use crate::view::{visible_slice, ViewState};

use super::helpers::check_index;

/// Removes the book at `old_index` and reinserts it at `new_index`.
pub fn run(books: &mut Vec<Book>, old_index: usize, new_index: usize) -> Result<CmdResult> {
    check_index(old_index, books.len())?;
    check_index(new_index, books.len())?;

    if old_index == new_index {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("Book is already at that position"));
        return Ok(result);
    }

    let moved = books.remove(old_index);
    books.insert(new_index, moved.clone());

    let mut result = CmdResult::default().changed();
    result.add_message(CmdMessage::success(format!(
        "Moved {} to position {}",
        moved.title,
        new_index + 1
    )));
    Ok(result.with_affected_books(vec![moved]))
}

/// Moves the book at visible position `old_pos` to where the book at `new_pos` sits,
/// both positions being zero-based offsets into the current page.
pub fn run_visible(
    books: &mut Vec<Book>,
    view: &ViewState,
    old_pos: usize,
    new_pos: usize,
) -> Result<CmdResult> {
    let page = visible_slice(books, view);
    let len = page.books.len();
    let from = page
        .books
        .get(old_pos)
        .ok_or(BooklistError::Index { index: old_pos, len })?
        .position;
    let to = page
        .books
        .get(new_pos)
        .ok_or(BooklistError::Index { index: new_pos, len })?
        .position;

    run(books, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.title.as_str()).collect()
    }

    fn abc() -> Vec<Book> {
        vec![Book::new("A", "x"), Book::new("B", "y"), Book::new("C", "z")]
    }

    #[test]
    fn swaps_first_two() {
        let mut books = abc();
        run(&mut books, 0, 1).unwrap();
        assert_eq!(titles(&books), vec!["B", "A", "C"]);
    }

    #[test]
    fn moves_last_to_front() {
        let mut books = abc();
        run(&mut books, 2, 0).unwrap();
        assert_eq!(titles(&books), vec!["C", "A", "B"]);
    }

    #[test]
    fn moves_first_to_back() {
        let mut books = abc();
        run(&mut books, 0, 2).unwrap();
        assert_eq!(titles(&books), vec!["B", "C", "A"]);
    }

    #[test]
    fn same_index_changes_nothing() {
        let mut books = abc();
        let result = run(&mut books, 1, 1).unwrap();
        assert!(!result.changed);
        assert_eq!(titles(&books), vec!["A", "B", "C"]);
    }

    #[test]
    fn out_of_range_is_an_index_error() {
        let mut books = abc();
        assert!(matches!(
            run(&mut books, 3, 0),
            Err(BooklistError::Index { index: 3, len: 3 })
        ));
        assert!(matches!(
            run(&mut books, 0, 7),
            Err(BooklistError::Index { index: 7, len: 3 })
        ));
        assert_eq!(titles(&books), vec!["A", "B", "C"]);
    }

    #[test]
    fn visible_positions_are_translated_under_a_filter() {
        let mut books = vec![
            Book::new("Dune", "Herbert"),
            Book::new("1984", "Orwell"),
            Book::new("Emma", "Austen"),
            Book::new("Animal Farm", "Orwell"),
        ];
        let mut view = ViewState::new(5);
        view.search_query = "orwell".to_string();

        // Visible: [1984, Animal Farm]; drag Animal Farm above 1984.
        run_visible(&mut books, &view, 1, 0).unwrap();

        assert_eq!(titles(&books), vec!["Dune", "Animal Farm", "1984", "Emma"]);
    }

    #[test]
    fn visible_positions_respect_the_current_page() {
        let mut books: Vec<Book> = (1..=7).map(|i| Book::new(format!("B{}", i), "a")).collect();
        let mut view = ViewState::new(5);
        view.current_page = 2;

        run_visible(&mut books, &view, 1, 0).unwrap();

        assert_eq!(
            titles(&books),
            vec!["B1", "B2", "B3", "B4", "B5", "B7", "B6"]
        );
    }

    #[test]
    fn visible_position_past_the_page_is_an_index_error() {
        let mut books = abc();
        let view = ViewState::new(5);
        assert!(matches!(
            run_visible(&mut books, &view, 0, 3),
            Err(BooklistError::Index { index: 3, len: 3 })
        ));
    }
}
