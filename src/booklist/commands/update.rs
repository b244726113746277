use crate::commands::{CmdMessage, CmdResult};
use crate::error::{BooklistError, Result};
use crate::model::{Book, BookId};
use crate::view::ViewState;

use super::helpers::{find_index, validate_fields};

/// Replaces title and author in place. Id and position never change.
pub fn run(
    books: &mut [Book],
    view: &mut ViewState,
    id: &BookId,
    title: &str,
    author: &str,
) -> Result<CmdResult> {
    let index = find_index(books, id).ok_or(BooklistError::NotFound(*id))?;
    validate_fields(title, author)?;

    let book = &mut books[index];
    book.title = title.to_string();
    book.author = author.to_string();
    let updated = book.clone();

    view.editing = None;
    // An edit can move a book in or out of the active filter.
    view.clamp_page(books);

    let mut result = CmdResult::default().changed();
    result.add_message(CmdMessage::success(format!(
        "Book updated: {} by {}",
        updated.title, updated.author
    )));
    Ok(result.with_affected_books(vec![updated]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Vec<Book>, ViewState) {
        (
            vec![
                Book::new("Dune", "Herbert"),
                Book::new("1948", "Orwel"),
                Book::new("Emma", "Austen"),
            ],
            ViewState::default(),
        )
    }

    #[test]
    fn updates_in_place() {
        let (mut books, mut view) = setup();
        let id = books[1].id;

        run(&mut books, &mut view, &id, "1984", "Orwell").unwrap();

        assert_eq!(books[1].id, id);
        assert_eq!(books[1].title, "1984");
        assert_eq!(books[1].author, "Orwell");
        assert_eq!(books[0].title, "Dune");
        assert_eq!(books[2].title, "Emma");
    }

    #[test]
    fn unknown_id_is_not_found_and_mutates_nothing() {
        let (mut books, mut view) = setup();
        let before = books.clone();
        let missing = BookId::new();

        let err = run(&mut books, &mut view, &missing, "X", "Y").unwrap_err();

        assert!(matches!(err, BooklistError::NotFound(id) if id == missing));
        assert_eq!(books, before);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let (mut books, mut view) = setup();
        let before = books.clone();
        let id = books[0].id;

        assert!(matches!(
            run(&mut books, &mut view, &id, "", "Herbert"),
            Err(BooklistError::Validation(_))
        ));
        assert!(matches!(
            run(&mut books, &mut view, &id, "Dune", ""),
            Err(BooklistError::Validation(_))
        ));
        assert_eq!(books, before);
    }

    #[test]
    fn clears_pending_edit() {
        let (mut books, mut view) = setup();
        let id = books[0].id;
        view.editing = Some(id);

        run(&mut books, &mut view, &id, "Dune Messiah", "Herbert").unwrap();
        assert_eq!(view.editing, None);
    }

    #[test]
    fn clamps_page_when_edit_drops_a_match() {
        let mut books: Vec<Book> = (0..6).map(|i| Book::new(format!("Saga {}", i), "A")).collect();
        let mut view = ViewState::new(5);
        view.search_query = "saga".to_string();
        view.current_page = 2;
        let id = books[5].id;

        run(&mut books, &mut view, &id, "Other", "A").unwrap();
        assert_eq!(view.current_page, 1);
    }
}
