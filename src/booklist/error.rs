use crate::model::BookId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BooklistError {
    #[error("{0}")]
    Validation(String),

    #[error("Book not found: {0}")]
    NotFound(BookId),

    #[error("Index {index} is out of range (only {len} available)")]
    Index { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, BooklistError>;
