//! # View State
//!
//! What the user is currently looking at: a search filter and a page. None of this is
//! persisted; it lives for one session and is rebuilt on startup.
//!
//! The visible list is always derived from the full collection in collection order:
//!
//! ```text
//! collection ──filter(search)──▶ matches ──window(page, page_size)──▶ Page
//! ```
//!
//! Each visible entry keeps its position in the full collection, so a UI can address
//! books unambiguously while a filter is active.

use crate::model::{Book, BookId, SortKey};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub search_query: String,
    pub current_page: usize,
    pub page_size: usize,
    /// Key of the last sort applied this session. `None` until the user sorts.
    pub sort_key: Option<SortKey>,
    /// Book currently opened for editing, if any.
    pub editing: Option<BookId>,
}

impl ViewState {
    pub fn new(page_size: usize) -> Self {
        Self {
            search_query: String::new(),
            current_page: 1,
            page_size: page_size.max(1),
            sort_key: None,
            editing: None,
        }
    }

    pub fn is_filtered(&self) -> bool {
        !self.search_query.is_empty()
    }

    /// Number of pages for `visible_count` matches. Never less than one.
    pub fn page_count(&self, visible_count: usize) -> usize {
        visible_count.div_ceil(self.page_size).max(1)
    }

    /// Pull `current_page` back into range after the visible set changed.
    pub fn clamp_page(&mut self, books: &[Book]) {
        let pages = self.page_count(matching(books, &self.search_query).count());
        self.current_page = self.current_page.clamp(1, pages);
    }
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(5)
    }
}

/// A book as shown in a page, with its zero-based position in the full collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibleBook {
    pub position: usize,
    pub book: Book,
}

/// One window of the filtered collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub books: Vec<VisibleBook>,
    pub page: usize,
    pub page_count: usize,
    /// Matches across all pages.
    pub total_matches: usize,
    /// Size of the unfiltered collection.
    pub total_books: usize,
}

impl Page {
    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Book> {
        self.books.iter().map(|vb| &vb.book)
    }
}

/// Iterates `(position, book)` for every book matching `query`, in collection order.
pub fn matching<'a>(books: &'a [Book], query: &str) -> impl Iterator<Item = (usize, &'a Book)> {
    let needle = query.to_lowercase();
    books
        .iter()
        .enumerate()
        .filter(move |(_, book)| book.matches(&needle))
}

/// Applies the search filter and cuts out the current page. Does not touch `view`.
pub fn visible_slice(books: &[Book], view: &ViewState) -> Page {
    let matches: Vec<(usize, &Book)> = matching(books, &view.search_query).collect();
    let page_count = view.page_count(matches.len());
    let page = view.current_page.clamp(1, page_count);
    let start = (page - 1) * view.page_size;

    let books_on_page = matches
        .iter()
        .skip(start)
        .take(view.page_size)
        .map(|(position, book)| VisibleBook {
            position: *position,
            book: (*book).clone(),
        })
        .collect();

    Page {
        books: books_on_page,
        page,
        page_count,
        total_matches: matches.len(),
        total_books: books.len(),
    }
}
