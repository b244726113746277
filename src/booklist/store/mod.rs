//! # Storage Layer
//!
//! This module defines the persistence boundary for booklist. The [`DataStore`] trait
//! is the whole contract: load the collection, save the collection.
//!
//! ## Blob Model
//!
//! The collection is persisted as a **single named blob**: the JSON array of
//! `{ "id", "title", "author" }` objects, in collection order. There is no per-book
//! file and no index. Every save rewrites the full, unfiltered list.
//!
//! - A missing blob is not an error: `load_books` returns an empty list.
//! - A malformed blob is reported as [`BooklistError::Serialization`](crate::error::BooklistError).
//!   The API layer downgrades it to a warning and starts from an empty collection.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production storage, `<data_dir>/<blob>.json`, atomic writes.
//! - [`memory::InMemoryStore`]: For testing logic without filesystem I/O. Can simulate
//!   write failures.
//!
//! ## Storage Layout
//!
//! ```text
//! <data_dir>/
//! ├── books.json      # The collection blob
//! └── config.json     # Configuration
//! ```

use crate::error::Result;
use crate::model::Book;

pub mod fs;
pub mod memory;

/// Abstract interface for collection persistence.
pub trait DataStore {
    /// Load the full collection. Returns an empty list when nothing was saved yet.
    fn load_books(&self) -> Result<Vec<Book>>;

    /// Replace the persisted collection with `books`, preserving order.
    fn save_books(&mut self, books: &[Book]) -> Result<()>;

    /// Human-readable location of the blob (a path for file stores).
    fn location(&self) -> String;
}
