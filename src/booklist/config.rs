//! # Configuration
//!
//! Settings live in `config.json` inside the data directory. A missing file means
//! defaults; unknown keys are ignored and missing keys fall back to defaults.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `page-size` | `5` | Books per page when listing |
//! | `blob-name` | `books` | Name of the collection blob (`<name>.json`) |

use crate::error::{BooklistError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
/// Blob name that would land on top of `config.json`.
pub const RESERVED_BLOB_NAME: &str = "config";
const DEFAULT_PAGE_SIZE: usize = 5;
const DEFAULT_BLOB_NAME: &str = "books";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BooklistConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,

    #[serde(default = "default_blob_name")]
    pub blob_name: String,
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_blob_name() -> String {
    DEFAULT_BLOB_NAME.to_string()
}

impl Default for BooklistConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            blob_name: DEFAULT_BLOB_NAME.to_string(),
        }
    }
}

impl BooklistConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(BooklistError::Io)?;
        let mut config: BooklistConfig =
            serde_json::from_str(&content).map_err(BooklistError::Serialization)?;
        if config.page_size == 0 {
            config.page_size = DEFAULT_PAGE_SIZE;
        }
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(BooklistError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(BooklistError::Serialization)?;
        fs::write(config_path, content).map_err(BooklistError::Io)?;
        Ok(())
    }

    /// Names accepted by [`get`](Self::get) and [`set`](Self::set).
    pub fn keys() -> &'static [&'static str] {
        &["page-size", "blob-name"]
    }

    pub fn get(&self, key: &str) -> Result<String> {
        match key {
            "page-size" => Ok(self.page_size.to_string()),
            "blob-name" => Ok(self.blob_name.clone()),
            other => Err(BooklistError::Api(format!("Unknown config key: {}", other))),
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "page-size" => {
                let size: usize = value.parse().map_err(|_| {
                    BooklistError::Validation(format!("page-size must be a number, got '{}'", value))
                })?;
                if size == 0 {
                    return Err(BooklistError::Validation(
                        "page-size must be greater than zero".to_string(),
                    ));
                }
                self.page_size = size;
            }
            "blob-name" => {
                let name = value.trim().trim_end_matches(".json");
                if name.is_empty()
                    || name.contains(['/', '\\'])
                    || name.eq_ignore_ascii_case(RESERVED_BLOB_NAME)
                {
                    return Err(BooklistError::Validation(format!(
                        "Invalid blob name: '{}'",
                        value
                    )));
                }
                self.blob_name = name.to_string();
            }
            other => {
                return Err(BooklistError::Api(format!("Unknown config key: {}", other)));
            }
        }
        Ok(())
    }
}
