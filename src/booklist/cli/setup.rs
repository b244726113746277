use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "booklist", bin_name = "booklist", version = get_version())]
#[command(about = "Keep an ordered list of books", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the book list and its config (overrides BOOKLIST_DATA)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    Title,
    Author,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportKind {
    Csv,
    Pdf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book to the end of the list
    #[command(alias = "a", alias = "create")]
    Add {
        /// Title of the book
        title: String,

        /// Author of the book
        author: String,
    },

    /// List books, one page at a time
    #[command(alias = "ls")]
    List {
        /// Only show books whose title or author contains this text
        #[arg(short, long)]
        search: Option<String>,

        /// Page to show (clamped to the available pages)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Search books by title or author
    Search {
        term: String,

        /// Page to show
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Replace the title and author of a book
    #[command(alias = "e")]
    Edit {
        /// Position in the list (e.g. 3) or book id
        book: String,

        /// New title
        title: String,

        /// New author
        author: String,
    },

    /// Delete one or more books
    #[command(alias = "rm")]
    Delete {
        /// Positions in the list (e.g. 1 3 5) or book ids
        #[arg(required = true, num_args = 1..)]
        books: Vec<String>,
    },

    /// Move a book to another position
    #[command(alias = "mv")]
    Move {
        /// Current position of the book
        from: usize,

        /// Position to move it to
        to: usize,
    },

    /// Sort the whole list (the new order is saved)
    Sort {
        #[arg(value_enum)]
        by: SortField,
    },

    /// Export the whole list
    Export {
        #[arg(value_enum)]
        format: ExportKind,

        /// Output file (defaults to books.csv / books.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (page-size, blob-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
