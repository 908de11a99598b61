//! # Storage Layer
//!
//! This module defines the storage abstraction for libris. The [`DataStore`] trait
//! lets the command layer work against different backends, and [`Collection`] owns
//! the in-memory records between a load and a save.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production JSON file storage
//!   - The whole collection is one JSON array in `data/library.json`
//!   - Every save rewrites the file through a temp file + rename
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Scope Pattern
//!
//! All operations take a [`Scope`] parameter:
//! - `Scope::Project`: the library in the current directory
//! - `Scope::Global`: the per-user library (`~/.local/share/libris/`)
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <root>/
//! ├── data/
//! │   └── library.json    # All books (JSON array, insertion order)
//! ├── book_images/
//! │   └── Dune.png        # 200x200 covers, named from the title
//! ├── placeholder.png     # Optional fallback cover
//! └── libris.json         # Configuration
//! ```

use crate::error::Result;
use crate::model::{Book, Scope};
use std::path::PathBuf;

pub mod collection;
pub mod fs;
pub mod memory;

pub use collection::Collection;

/// Abstract interface for book storage.
///
/// A store only moves whole collections in and out; all record-level work
/// happens on a [`Collection`] in memory.
pub trait DataStore {
    /// Load every book in the scope, in stored order. A missing library is empty.
    fn load_books(&self, scope: Scope) -> Result<Vec<Book>>;

    /// Replace the stored collection for the scope.
    fn save_books(&mut self, scope: Scope, books: &[Book]) -> Result<()>;

    /// Where the collection lives (for file-based stores)
    fn library_path(&self, scope: Scope) -> Result<PathBuf>;
}
