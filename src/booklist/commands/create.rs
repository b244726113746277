use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Book;
use crate::view::ViewState;

use super::helpers::validate_fields;

/// Appends a new book. The current page is left alone even if the book lands elsewhere.
pub fn run(
    books: &mut Vec<Book>,
    view: &mut ViewState,
    title: &str,
    author: &str,
) -> Result<CmdResult> {
    validate_fields(title, author)?;

    let book = Book::new(title, author);
    books.push(book.clone());
    view.editing = None;

    let mut result = CmdResult::default().changed();
    result.add_message(CmdMessage::success(format!(
        "Book added: {} by {}",
        book.title, book.author
    )));
    Ok(result.with_affected_books(vec![book]))
}
