use crate::commands::CmdResult;
use crate::error::{BooklistError, Result};
use crate::model::{Book, BookId};
use crate::view::ViewState;

use super::helpers::find_index;

/// Opens a book for editing and hands back its current values for a form.
pub fn begin(books: &[Book], view: &mut ViewState, id: &BookId) -> Result<CmdResult> {
    let index = find_index(books, id).ok_or(BooklistError::NotFound(*id))?;
    view.editing = Some(*id);
    Ok(CmdResult::default().with_affected_books(vec![books[index].clone()]))
}

pub fn cancel(view: &mut ViewState) -> Result<CmdResult> {
    view.editing = None;
    Ok(CmdResult::default())
}
