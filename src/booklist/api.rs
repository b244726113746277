//! # API Facade
//!
//! [`BookListStore`] is the single entry point for all booklist operations, regardless of
//! the UI being used. It owns the collection and the view state and is the only place
//! that talks to the [`DataStore`].
//!
//! ## Role and Responsibilities
//!
//! - **Dispatches** to the command functions in `commands/*.rs`
//! - **Persists** the full collection after every mutating command
//! - **Normalizes inputs** (selectors → ids)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! ## Persistence Failures
//!
//! A failed save does not undo the mutation. The in-memory collection stays
//! authoritative, the store is marked dirty, and the result carries a warning. The next
//! mutation or an explicit [`save`](BookListStore::save) retries.
//!
//! ## Generic Over DataStore
//!
//! - Production: `BookListStore<FileStore>`
//! - Testing: `BookListStore<InMemoryStore>`

use crate::commands;
use crate::commands::helpers::resolve_selectors;
use crate::error::{BooklistError, Result};
use crate::model::{Book, BookId, SortKey};
use crate::store::DataStore;
use crate::view::{self, Page, ViewState};
use std::path::Path;

pub struct BookListStore<S: DataStore> {
    store: S,
    books: Vec<Book>,
    view: ViewState,
    dirty: bool,
}

impl<S: DataStore> BookListStore<S> {
    /// Creates an empty store. Call [`load`](Self::load) to read persisted books.
    pub fn new(store: S, page_size: usize) -> Self {
        Self {
            store,
            books: Vec::new(),
            view: ViewState::new(page_size),
            dirty: false,
        }
    }

    /// Creates a store and loads it in one go.
    pub fn open(store: S, page_size: usize) -> (Self, CmdResult) {
        let mut api = Self::new(store, page_size);
        let result = api.load();
        (api, result)
    }

    /// Replaces the in-memory collection with the persisted one.
    ///
    /// A missing blob yields an empty collection. An unreadable one also yields an empty
    /// collection, reported as a warning rather than an error.
    pub fn load(&mut self) -> CmdResult {
        let mut result = CmdResult::default();
        self.books = match self.store.load_books() {
            Ok(books) => dedupe_ids(books, &mut result),
            Err(e) => {
                result.add_message(CmdMessage::warning(format!(
                    "Could not read saved books from {} ({}); starting with an empty list",
                    self.store.location(),
                    e
                )));
                Vec::new()
            }
        };
        self.dirty = false;
        self.view.editing = None;
        self.view.clamp_page(&self.books);
        result
    }

    pub fn create(&mut self, title: &str, author: &str) -> Result<CmdResult> {
        let result = commands::create::run(&mut self.books, &mut self.view, title, author)?;
        Ok(self.persist(result))
    }

    pub fn update(&mut self, id: &BookId, title: &str, author: &str) -> Result<CmdResult> {
        let result = commands::update::run(&mut self.books, &mut self.view, id, title, author)?;
        Ok(self.persist(result))
    }

    pub fn delete(&mut self, id: &BookId) -> Result<CmdResult> {
        let result = commands::delete::run(&mut self.books, &mut self.view, id)?;
        Ok(self.persist(result))
    }

    /// Moves a book using zero-based indices into the full collection.
    pub fn reorder(&mut self, old_index: usize, new_index: usize) -> Result<CmdResult> {
        let result = commands::reorder::run(&mut self.books, old_index, new_index)?;
        Ok(self.persist(result))
    }

    /// Moves a book using zero-based positions inside the current visible page.
    pub fn reorder_visible(&mut self, old_pos: usize, new_pos: usize) -> Result<CmdResult> {
        let result =
            commands::reorder::run_visible(&mut self.books, &self.view, old_pos, new_pos)?;
        Ok(self.persist(result))
    }

    pub fn sort_by(&mut self, key: SortKey) -> Result<CmdResult> {
        let result = commands::sort::run(&mut self.books, key)?;
        self.view.sort_key = Some(key);
        Ok(self.persist(result))
    }

    pub fn set_search_query(&mut self, query: &str) -> Result<CmdResult> {
        commands::search::run(&self.books, &mut self.view, query)
    }

    pub fn set_page(&mut self, n: usize) -> Result<CmdResult> {
        commands::page::run(&self.books, &mut self.view, n)
    }

    pub fn begin_edit(&mut self, id: &BookId) -> Result<CmdResult> {
        commands::edit::begin(&self.books, &mut self.view, id)
    }

    pub fn cancel_edit(&mut self) -> Result<CmdResult> {
        commands::edit::cancel(&mut self.view)
    }

    pub fn export(&self, format: ExportFormat, output: Option<&Path>) -> Result<CmdResult> {
        commands::export::run(&self.books, format, output)
    }

    pub fn export_csv(&self) -> String {
        commands::export::to_csv(&self.books)
    }

    pub fn export_pdf(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        commands::export::write_pdf(&mut buf, &self.books, chrono::Utc::now())?;
        Ok(buf)
    }

    /// The current page of the filtered collection. Pure query.
    pub fn visible_slice(&self) -> Page {
        view::visible_slice(&self.books, &self.view)
    }

    /// Retries persistence after an earlier failure. Does nothing when clean.
    pub fn save(&mut self) -> Result<CmdResult> {
        let mut result = CmdResult::default();
        if self.dirty {
            self.store.save_books(&self.books)?;
            self.dirty = false;
            result.add_message(CmdMessage::info(format!(
                "Saved {} books to {}",
                self.books.len(),
                self.store.location()
            )));
        }
        Ok(result)
    }

    pub fn resolve(&self, selectors: &[BookSelector]) -> Result<Vec<BookId>> {
        resolve_selectors(&self.books, selectors)
    }

    pub fn resolve_one(&self, selector: &BookSelector) -> Result<BookId> {
        self.resolve(std::slice::from_ref(selector))?
            .into_iter()
            .next()
            .ok_or_else(|| BooklistError::Api(format!("Nothing matches {}", selector)))
    }

    pub fn get(&self, id: &BookId) -> Option<&Book> {
        self.books.iter().find(|b| &b.id == id)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn current_page(&self) -> usize {
        self.view.current_page
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn location(&self) -> String {
        self.store.location()
    }

    pub fn data_store(&self) -> &S {
        &self.store
    }

    pub fn data_store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    fn persist(&mut self, mut result: CmdResult) -> CmdResult {
        if !result.changed && !self.dirty {
            return result;
        }
        match self.store.save_books(&self.books) {
            Ok(()) => self.dirty = false,
            Err(e) => {
                self.dirty = true;
                result.add_message(CmdMessage::warning(format!(
                    "Changes kept in memory but not saved to {}: {}",
                    self.store.location(),
                    e
                )));
            }
        }
        result
    }
}

/// Drops later duplicates of an id so the uniqueness invariant holds after a load.
fn dedupe_ids(books: Vec<Book>, result: &mut CmdResult) -> Vec<Book> {
    let mut seen = std::collections::HashSet::new();
    let before = books.len();
    let unique: Vec<Book> = books.into_iter().filter(|b| seen.insert(b.id)).collect();
    if unique.len() != before {
        result.add_message(CmdMessage::warning(format!(
            "Ignored {} book(s) with duplicate ids",
            before - unique.len()
        )));
    }
    unique
}

pub use crate::commands::export::ExportFormat;
pub use crate::commands::helpers::BookSelector;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn api_with(books: Vec<Book>) -> BookListStore<InMemoryStore> {
        let (api, _) = BookListStore::open(InMemoryStore::with_books(books), 5);
        api
    }

    #[test]
    fn load_reads_persisted_books() {
        let store = StoreFixture::new().with_books(3).build();
        let (api, result) = BookListStore::open(store, 5);
        assert_eq!(api.books().len(), 3);
        assert!(result.messages.is_empty());
    }

    #[test]
    fn load_of_missing_blob_is_empty_without_warning() {
        let (api, result) = BookListStore::open(InMemoryStore::new(), 5);
        assert!(api.books().is_empty());
        assert!(!result.has_warnings());
    }

    #[test]
    fn load_of_corrupt_blob_warns_and_starts_empty() {
        let mut store = InMemoryStore::with_books(vec![Book::new("Dune", "Herbert")]);
        store.set_corrupt(true);
        let (api, result) = BookListStore::open(store, 5);
        assert!(api.books().is_empty());
        assert!(result.has_warnings());
    }

    #[test]
    fn load_drops_duplicate_ids() {
        let book = Book::new("Dune", "Herbert");
        let (api, result) =
            BookListStore::open(InMemoryStore::with_books(vec![book.clone(), book]), 5);
        assert_eq!(api.books().len(), 1);
        assert!(result.has_warnings());
    }

    #[test]
    fn create_persists_and_is_retrievable() {
        let mut api = api_with(vec![]);
        let result = api.create("Dune", "Herbert").unwrap();
        let id = result.affected_books[0].id;

        assert_eq!(api.get(&id).unwrap().title, "Dune");
        assert_eq!(api.data_store().saved().unwrap().len(), 1);
    }

    #[test]
    fn failed_validation_does_not_save() {
        let mut api = api_with(vec![]);
        assert!(api.create("", "Herbert").is_err());
        assert_eq!(api.data_store().save_count(), 0);
    }

    #[test]
    fn every_mutation_persists_full_order() {
        let mut api = api_with(vec![]);
        api.create("B", "b").unwrap();
        api.create("A", "a").unwrap();
        api.create("C", "c").unwrap();
        api.sort_by(SortKey::Title).unwrap();
        api.reorder(2, 0).unwrap();
        let first = api.books()[0].id;
        api.update(&first, "Z", "z").unwrap();
        let last = api.books()[2].id;
        api.delete(&last).unwrap();

        assert_eq!(api.data_store().save_count(), 7);
        assert_eq!(api.data_store().saved().unwrap(), api.books());
    }

    #[test]
    fn sort_key_is_remembered_for_the_session_only() {
        let mut api = api_with(vec![Book::new("B", "b"), Book::new("A", "a")]);
        assert_eq!(api.view().sort_key, None);

        api.sort_by(SortKey::Author).unwrap();
        assert_eq!(api.view().sort_key, Some(SortKey::Author));

        let raw = serde_json::to_string(api.data_store().saved().unwrap()).unwrap();
        assert!(!raw.contains("sort"));
    }

    #[test]
    fn search_and_paging_do_not_persist() {
        let mut api = api_with(vec![Book::new("Dune", "Herbert")]);
        api.set_search_query("dune").unwrap();
        api.set_page(3).unwrap();
        api.visible_slice();
        assert_eq!(api.data_store().save_count(), 0);
    }

    #[test]
    fn search_scenario_from_two_books() {
        let mut api = api_with(vec![
            Book::new("Dune", "Herbert"),
            Book::new("1984", "Orwell"),
        ]);
        api.set_search_query("1984").unwrap();
        let page = api.visible_slice();

        let items: Vec<&Book> = page.items().collect();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "1984");
        assert_eq!(items[0].author, "Orwell");
        assert_eq!(page.page_count, 1);
    }

    #[test]
    fn deleting_last_item_of_last_page_clamps() {
        let store = StoreFixture::new().with_books(11).build();
        let (mut api, _) = BookListStore::open(store, 5);
        api.set_page(3).unwrap();
        assert_eq!(api.current_page(), 3);

        let last = api.books()[10].id;
        api.delete(&last).unwrap();
        assert_eq!(api.current_page(), 2);
    }

    #[test]
    fn write_failure_keeps_memory_and_warns() {
        let mut api = api_with(vec![]);
        api.data_store_mut().set_simulate_write_error(true);

        let result = api.create("Dune", "Herbert").unwrap();

        assert!(result.has_warnings());
        assert_eq!(api.books().len(), 1);
        assert!(api.is_dirty());
        assert!(api.save().is_err());

        api.data_store_mut().set_simulate_write_error(false);
        api.save().unwrap();
        assert!(!api.is_dirty());
        assert_eq!(api.data_store().saved().unwrap().len(), 1);
    }

    #[test]
    fn no_op_after_failed_save_still_retries() {
        let mut api = api_with(vec![Book::new("Dune", "Herbert")]);
        api.data_store_mut().set_simulate_write_error(true);
        let id = api.books()[0].id;
        api.update(&id, "Dune", "Frank Herbert").unwrap();
        api.data_store_mut().set_simulate_write_error(false);

        // Deleting a vanished id changes nothing but flushes the pending save.
        api.delete(&BookId::new()).unwrap();
        assert!(!api.is_dirty());
        assert_eq!(api.data_store().saved().unwrap()[0].author, "Frank Herbert");
    }

    #[test]
    fn reorder_visible_uses_filtered_positions() {
        let mut api = api_with(vec![
            Book::new("Dune", "Herbert"),
            Book::new("1984", "Orwell"),
            Book::new("Animal Farm", "Orwell"),
        ]);
        api.set_search_query("orwell").unwrap();
        api.reorder_visible(1, 0).unwrap();

        let titles: Vec<&str> = api.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Dune", "Animal Farm", "1984"]);
    }

    #[test]
    fn edit_session_is_cleared_by_create() {
        let mut api = api_with(vec![Book::new("Dune", "Herbert")]);
        let id = api.books()[0].id;
        api.begin_edit(&id).unwrap();
        assert_eq!(api.view().editing, Some(id));

        api.create("Emma", "Austen").unwrap();
        assert_eq!(api.view().editing, None);
    }

    #[test]
    fn resolve_one_maps_positions() {
        let api = api_with(vec![Book::new("Dune", "Herbert"), Book::new("Emma", "Austen")]);
        let id = api.resolve_one(&BookSelector::Position(2)).unwrap();
        assert_eq!(api.get(&id).unwrap().title, "Emma");
    }

    #[test]
    fn export_csv_uses_full_order_regardless_of_filter() {
        let mut api = api_with(vec![
            Book::new("Dune", "Herbert"),
            Book::new("1984", "Orwell"),
        ]);
        api.set_search_query("1984").unwrap();
        assert_eq!(api.export_csv(), "Title,Author\nDune,Herbert\n1984,Orwell");
    }
}
