use super::DataStore;
use crate::error::{BooklistError, Result};
use crate::model::Book;

/// In-memory storage for testing and development.
/// Does NOT persist data across processes.
#[derive(Default)]
pub struct InMemoryStore {
    books: Option<Vec<Book>>,
    corrupt: bool,
    simulate_write_error: bool,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store as if `books` had been saved earlier.
    pub fn with_books(books: Vec<Book>) -> Self {
        Self {
            books: Some(books),
            ..Self::default()
        }
    }

    /// Make the next loads fail as if the blob were unreadable.
    pub fn set_corrupt(&mut self, corrupt: bool) {
        self.corrupt = corrupt;
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&mut self, simulate: bool) {
        self.simulate_write_error = simulate;
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    /// What was last saved, if anything.
    pub fn saved(&self) -> Option<&[Book]> {
        self.books.as_deref()
    }
}

impl DataStore for InMemoryStore {
    fn load_books(&self) -> Result<Vec<Book>> {
        if self.corrupt {
            let err = <serde_json::Error as serde::de::Error>::custom("simulated corrupt blob");
            return Err(BooklistError::Serialization(err));
        }
        Ok(self.books.clone().unwrap_or_default())
    }

    fn save_books(&mut self, books: &[Book]) -> Result<()> {
        if self.simulate_write_error {
            return Err(BooklistError::Store("Simulated write error".to_string()));
        }
        self.books = Some(books.to_vec());
        self.saves += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory://books".to_string()
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
        books: Vec<Book>,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
                books: Vec::new(),
            }
        }

        pub fn with_books(mut self, count: usize) -> Self {
            for i in 0..count {
                self.books.push(Book::new(
                    format!("Test Book {}", i + 1),
                    format!("Author {}", i + 1),
                ));
            }
            self
        }

        pub fn with_book(mut self, title: &str, author: &str) -> Self {
            self.books.push(Book::new(title, author));
            self
        }

        pub fn build(self) -> InMemoryStore {
            if self.books.is_empty() {
                return self.store;
            }
            InMemoryStore::with_books(self.books)
        }
    }
}
