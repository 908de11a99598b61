use clap::{Parser, Subcommand};
use libris::api::ExportFormat;
use libris::model::{SearchField, SortKey};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "libris", bin_name = "libris", version)]
#[command(about = "Personal book collection manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Use the per-user library instead of the current directory
    #[arg(short, long, global = true, help_heading = "Options")]
    pub global: bool,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a book with its cover image
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        author: String,

        /// Publication year (digits only)
        #[arg(long)]
        year: String,

        #[arg(long)]
        genre: String,

        /// Mark the book as read
        #[arg(long)]
        read: bool,

        /// Cover image file (any format the image decoder understands)
        #[arg(long)]
        cover: Option<PathBuf>,
    },

    /// List books
    #[command(alias = "ls")]
    List {
        /// Sort by title, author or year
        #[arg(short, long, default_value_t = SortKey::Title)]
        sort: SortKey,
    },

    /// Edit the book with the given title
    Edit {
        /// Current title of the book
        target: String,

        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        author: Option<String>,

        #[arg(long)]
        year: Option<String>,

        #[arg(long)]
        genre: Option<String>,

        /// Read status (true or false)
        #[arg(long)]
        read: Option<bool>,

        /// Replacement cover image file
        #[arg(long)]
        cover: Option<PathBuf>,
    },

    /// Search books by title or author (case-insensitive substring)
    Search {
        query: String,

        /// Field to search: title or author
        #[arg(short, long, default_value_t = SearchField::Title)]
        by: SearchField,

        /// Sort the matches by title, author or year
        #[arg(short, long)]
        sort: Option<SortKey>,
    },

    /// Remove every book with the given title
    #[command(alias = "rm")]
    Remove { title: String },

    /// Show reading statistics
    Stats,

    /// Export the collection as csv, json or a tar.gz archive with covers
    Export {
        #[arg(short, long, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file (defaults to a name in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print a book's cover as a base64 data URI
    Cover { title: String },

    /// Check covers against the library file
    Doctor {
        /// Clear missing cover paths and delete unreferenced cover files
        #[arg(long)]
        fix: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. cover-size)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },

    /// Initialize a library in the current scope
    Init,
}
