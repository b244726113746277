use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Book;
use crate::view::{visible_slice, ViewState};

/// Sets the search filter and jumps back to the first page.
pub fn run(books: &[Book], view: &mut ViewState, query: &str) -> Result<CmdResult> {
    view.search_query = query.to_string();
    view.current_page = 1;

    let page = visible_slice(books, view);
    let mut result = CmdResult::default();
    if view.is_filtered() && page.total_matches == 0 {
        result.add_message(CmdMessage::info(format!("No books match \"{}\"", query)));
    }
    Ok(result.with_page(page))
}
