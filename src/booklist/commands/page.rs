use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Book;
use crate::view::{matching, visible_slice, ViewState};

/// Moves to page `n`, clamped into the range of the filtered view.
pub fn run(books: &[Book], view: &mut ViewState, n: usize) -> Result<CmdResult> {
    let pages = view.page_count(matching(books, &view.search_query).count());
    view.current_page = n.clamp(1, pages);
    Ok(CmdResult::default().with_page(visible_slice(books, view)))
}
