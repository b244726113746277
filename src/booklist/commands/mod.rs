//! # Command Layer
//!
//! Pure business logic. Every command takes the collection (and, where relevant, the
//! view state) by reference, changes it in memory and reports what happened in a
//! [`CmdResult`]. Commands never persist and never print: the API facade saves after
//! mutating commands and the CLI decides how to show messages.
//!
//! A failing command must leave both the collection and the view state untouched.

use crate::model::Book;
use crate::view::Page;
use std::path::PathBuf;

pub mod create;
pub mod delete;
pub mod edit;
pub mod export;
pub mod helpers;
pub mod page;
pub mod reorder;
pub mod search;
pub mod sort;
pub mod update;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_books: Vec<Book>,
    pub page: Option<Page>,
    pub exported_to: Option<PathBuf>,
    pub messages: Vec<CmdMessage>,
    /// Whether the collection changed and needs to be persisted.
    pub changed: bool,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_books(mut self, books: Vec<Book>) -> Self {
        self.affected_books = books;
        self
    }

    pub fn with_page(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_exported_to(mut self, path: PathBuf) -> Self {
        self.exported_to = Some(path);
        self
    }

    pub fn changed(mut self) -> Self {
        self.changed = true;
        self
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| matches!(m.level, MessageLevel::Warning | MessageLevel::Error))
    }
}
