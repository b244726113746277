//! Property-based checks of the list invariants.

use booklist::api::BookListStore;
use booklist::commands::sort::collate;
use booklist::model::{BookId, SortKey};
use booklist::store::fs::FileStore;
use booklist::store::memory::InMemoryStore;
use booklist::store::DataStore;
use proptest::prelude::*;
use std::cmp::Ordering;

fn field() -> impl Strategy<Value = String> {
    "[A-Za-zéÉèàôç0-9 ]{0,12}[A-Za-zéÉ0-9]"
}

fn pairs(max: usize) -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec((field(), field()), 0..max)
}

fn store_with(pairs: &[(String, String)], page_size: usize) -> BookListStore<InMemoryStore> {
    let mut api = BookListStore::new(InMemoryStore::new(), page_size);
    for (title, author) in pairs {
        api.create(title, author).unwrap();
    }
    api
}

proptest! {
    /// Adding a filled-in book grows the list by one and the book is retrievable by id.
    #[test]
    fn create_appends_retrievable_book(existing in pairs(8), title in field(), author in field()) {
        let mut api = store_with(&existing, 5);
        let before = api.books().len();

        let result = api.create(&title, &author).unwrap();
        let id = result.affected_books[0].id;

        prop_assert_eq!(api.books().len(), before + 1);
        prop_assert_eq!(api.books().last().map(|b| b.id), Some(id));
        let book = api.get(&id).unwrap();
        prop_assert_eq!(&book.title, &title);
        prop_assert_eq!(&book.author, &author);
    }

    /// Blank fields never make it into the list.
    #[test]
    fn blank_fields_are_rejected(existing in pairs(5), filled in field(), blank in "[ ]{0,4}") {
        let mut api = store_with(&existing, 5);
        let before: Vec<BookId> = api.books().iter().map(|b| b.id).collect();

        prop_assert!(api.create(&blank, &filled).is_err());
        prop_assert!(api.create(&filled, &blank).is_err());

        let after: Vec<BookId> = api.books().iter().map(|b| b.id).collect();
        prop_assert_eq!(before, after);
    }

    /// Deleting twice leaves the same list as deleting once.
    #[test]
    fn delete_is_idempotent(existing in pairs(8).prop_filter("non-empty", |p| !p.is_empty()), pick in any::<prop::sample::Index>()) {
        let mut api = store_with(&existing, 5);
        let id = api.books()[pick.index(api.books().len())].id;

        api.delete(&id).unwrap();
        let once: Vec<BookId> = api.books().iter().map(|b| b.id).collect();
        api.delete(&id).unwrap();
        let twice: Vec<BookId> = api.books().iter().map(|b| b.id).collect();

        prop_assert_eq!(once.len(), existing.len() - 1);
        prop_assert_eq!(once, twice);
    }

    /// Updating an unknown id fails and changes nothing.
    #[test]
    fn update_of_unknown_id_fails(existing in pairs(5), title in field(), author in field()) {
        let mut api = store_with(&existing, 5);
        let before = api.books().to_vec();

        prop_assert!(api.update(&BookId::new(), &title, &author).is_err());
        prop_assert_eq!(api.books(), &before[..]);
    }

    /// After sorting, neighbours are in collation order and sorting again is a no-op.
    #[test]
    fn sort_orders_and_is_idempotent(existing in pairs(10), by_author in any::<bool>()) {
        let key = if by_author { SortKey::Author } else { SortKey::Title };
        let mut api = store_with(&existing, 5);

        api.sort_by(key).unwrap();
        for pair in api.books().windows(2) {
            prop_assert_ne!(collate(key.field(&pair[0]), key.field(&pair[1])), Ordering::Greater);
        }

        let first: Vec<BookId> = api.books().iter().map(|b| b.id).collect();
        let again = api.sort_by(key).unwrap();
        let second: Vec<BookId> = api.books().iter().map(|b| b.id).collect();
        prop_assert!(!again.changed);
        prop_assert_eq!(first, second);
    }

    /// Unfiltered, page one is exactly the first `page_size` books.
    #[test]
    fn first_page_is_prefix(existing in pairs(12), page_size in 1usize..6) {
        let api = store_with(&existing, page_size);
        let page = api.visible_slice();

        let expected: Vec<BookId> = api.books().iter().take(page_size).map(|b| b.id).collect();
        let shown: Vec<BookId> = page.items().map(|b| b.id).collect();
        prop_assert_eq!(shown, expected);
        prop_assert!(page.page_count >= 1);
    }

    /// Moving a book keeps the same set of books.
    #[test]
    fn reorder_is_a_permutation(
        existing in pairs(8).prop_filter("non-empty", |p| !p.is_empty()),
        from in any::<prop::sample::Index>(),
        to in any::<prop::sample::Index>(),
    ) {
        let mut api = store_with(&existing, 5);
        let len = api.books().len();
        let (from, to) = (from.index(len), to.index(len));
        let moved = api.books()[from].id;

        let mut before: Vec<BookId> = api.books().iter().map(|b| b.id).collect();
        api.reorder(from, to).unwrap();
        let mut after: Vec<BookId> = api.books().iter().map(|b| b.id).collect();

        prop_assert_eq!(after[to], moved);
        before.sort_by_key(|id| id.to_string());
        after.sort_by_key(|id| id.to_string());
        prop_assert_eq!(before, after);
    }

    /// Whatever is saved to disk comes back identical.
    #[test]
    fn file_store_round_trips(existing in pairs(8)) {
        let temp = tempfile::tempdir().unwrap();
        let api = store_with(&existing, 5);

        let mut store = FileStore::new(temp.path().to_path_buf());
        store.save_books(api.books()).unwrap();
        prop_assert_eq!(store.load_books().unwrap(), api.books().to_vec());
    }
}
