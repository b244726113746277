use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Book, BookId};
use crate::view::ViewState;

use super::helpers::find_index;

/// Removes a book. Deleting an id that is not there is a no-op.
pub fn run(books: &mut Vec<Book>, view: &mut ViewState, id: &BookId) -> Result<CmdResult> {
    let Some(index) = find_index(books, id) else {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info(format!("No book with id {}", id)));
        return Ok(result);
    };

    let removed = books.remove(index);
    if view.editing == Some(removed.id) {
        view.editing = None;
    }
    view.clamp_page(books);

    let mut result = CmdResult::default().changed();
    result.add_message(CmdMessage::success(format!(
        "Book deleted: {} by {}",
        removed.title, removed.author
    )));
    Ok(result.with_affected_books(vec![removed]))
}
