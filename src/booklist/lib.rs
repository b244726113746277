//! # Booklist Architecture
//!
//! Booklist is a **UI-agnostic book list library** with a small CLI on top. It keeps an
//! ordered collection of books, lets a client add, edit, delete, reorder, search, sort,
//! page through and export it, and persists the collection after every change.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, renders pages and messages             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs): BookListStore                          │
//! │  - Owns the collection and the view state                   │
//! │  - Persists after every mutation                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure list logic over `Vec<Book>` and `ViewState`         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait: load/save one JSON blob                 │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Collection vs. View
//!
//! The collection is the source of truth and is always persisted whole, in order.
//! Search and pagination only shape what is *shown* (see [`view`]); they never touch the
//! persisted order. Sorting and reordering do, and are saved like any other edit.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits the
//! process. Diagnostics travel back as [`commands::CmdMessage`] values.
//!
//! ## Module Overview
//!
//! - [`api`]: `BookListStore`, the entry point for all operations
//! - [`commands`]: Business logic for each operation, plus CSV/PDF export
//! - [`store`]: Persistence abstraction and implementations
//! - [`view`]: Search filter, pagination and page clamping
//! - [`model`]: Core data types (`Book`, `BookId`, `SortKey`)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod store;
pub mod view;
