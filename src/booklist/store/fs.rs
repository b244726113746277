use super::DataStore;
use crate::config::RESERVED_BLOB_NAME;
use crate::error::{BooklistError, Result};
use crate::model::Book;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

pub const DEFAULT_BLOB_NAME: &str = "books";

/// File-backed store: the whole collection lives in `<root>/<blob>.json`.
pub struct FileStore {
    root: PathBuf,
    blob_name: String,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            blob_name: DEFAULT_BLOB_NAME.to_string(),
        }
    }

    pub fn with_blob_name(mut self, name: &str) -> Self {
        let name = name.strip_suffix(".json").unwrap_or(name);
        if !name.is_empty() && !name.eq_ignore_ascii_case(RESERVED_BLOB_NAME) {
            self.blob_name = name.to_string();
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn blob_path(&self) -> PathBuf {
        self.root.join(format!("{}.json", self.blob_name))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(BooklistError::Io)?;
        }
        Ok(())
    }
}

impl DataStore for FileStore {
    fn load_books(&self) -> Result<Vec<Book>> {
        let path = self.blob_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(&path).map_err(BooklistError::Io)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let books: Vec<Book> =
            serde_json::from_str(&content).map_err(BooklistError::Serialization)?;
        Ok(books)
    }

    fn save_books(&mut self, books: &[Book]) -> Result<()> {
        self.ensure_dir()?;

        let content = serde_json::to_string_pretty(books).map_err(BooklistError::Serialization)?;

        // Atomic write
        let tmp_file = self
            .root
            .join(format!(".{}-{}.tmp", self.blob_name, Uuid::new_v4()));
        fs::write(&tmp_file, content).map_err(BooklistError::Io)?;
        fs::rename(&tmp_file, self.blob_path()).map_err(BooklistError::Io)?;

        Ok(())
    }

    fn location(&self) -> String {
        self.blob_path().display().to_string()
    }
}
