use crate::error::{BooklistError, Result};
use crate::model::{Book, BookId};
use std::fmt;
use std::str::FromStr;

/// Rejects blank titles or authors. Values are otherwise kept as typed.
pub fn validate_fields(title: &str, author: &str) -> Result<()> {
    match (title.trim().is_empty(), author.trim().is_empty()) {
        (false, false) => Ok(()),
        (true, true) => Err(BooklistError::Validation(
            "Please fill in all fields: title and author are required".to_string(),
        )),
        (true, false) => Err(BooklistError::Validation(
            "Please fill in all fields: title is required".to_string(),
        )),
        (false, true) => Err(BooklistError::Validation(
            "Please fill in all fields: author is required".to_string(),
        )),
    }
}

pub fn find_index(books: &[Book], id: &BookId) -> Option<usize> {
    books.iter().position(|b| &b.id == id)
}

pub fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(BooklistError::Index { index, len });
    }
    Ok(())
}

/// A user reference to a book: its 1-based position in the full collection, or its id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookSelector {
    Position(usize),
    Id(BookId),
}

impl fmt::Display for BookSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookSelector::Position(p) => write!(f, "{}", p),
            BookSelector::Id(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for BookSelector {
    type Err = BooklistError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err(BooklistError::Api("Positions start at 1".to_string()));
            }
            return Ok(BookSelector::Position(n));
        }
        s.parse::<BookId>()
            .map(BookSelector::Id)
            .map_err(|_| BooklistError::Api(format!("Invalid book reference: {}", s)))
    }
}

/// Turns selectors into ids. Positions must exist; ids are passed through unchecked.
pub fn resolve_selectors(books: &[Book], selectors: &[BookSelector]) -> Result<Vec<BookId>> {
    selectors
        .iter()
        .map(|sel| match sel {
            BookSelector::Position(p) => p
                .checked_sub(1)
                .and_then(|i| books.get(i))
                .map(|b| b.id)
                .ok_or_else(|| BooklistError::Api(format!("No book at position {}", p))),
            BookSelector::Id(id) => Ok(*id),
        })
        .collect()
}
