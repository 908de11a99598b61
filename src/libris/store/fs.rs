use super::DataStore;
use crate::commands::LibrisPaths;
use crate::config::LibrisConfig;
use crate::error::Result;
use crate::model::{Book, Scope};
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub struct FileStore {
    paths: LibrisPaths,
    config: LibrisConfig,
}

impl FileStore {
    pub fn new(paths: LibrisPaths) -> Self {
        Self {
            paths,
            config: LibrisConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LibrisConfig) -> Self {
        self.config = config;
        self
    }
}

impl DataStore for FileStore {
    fn load_books(&self, scope: Scope) -> Result<Vec<Book>> {
        let path = self.library_path(scope)?;
        if !path.exists() {
            tracing::debug!("No library at {}, starting empty", path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)?;
        let books: Vec<Book> = serde_json::from_str(&content)?;
        tracing::debug!("Loaded {} book(s) from {}", books.len(), path.display());
        Ok(books)
    }

    fn save_books(&mut self, scope: Scope, books: &[Book]) -> Result<()> {
        let path = self.library_path(scope)?;
        let content = encode_library(books)?;
        write_atomic(&path, &content)?;
        tracing::debug!("Saved {} book(s) to {}", books.len(), path.display());
        Ok(())
    }

    fn library_path(&self, scope: Scope) -> Result<PathBuf> {
        let root = self.paths.scope_dir(scope)?;
        Ok(self.config.library_path(&root))
    }
}

/// Serializes books as the library document: a JSON array with four-space indent.
pub fn encode_library(books: &[Book]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    books.serialize(&mut ser)?;
    Ok(buf)
}

/// Writes `content` to a temp file next to `path`, then renames it into place.
///
/// Missing parent directories are created. Readers never observe a partial file.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    write_atomic_with(path, |file| Ok(file.write_all(content)?))
}

/// Like [`write_atomic`], but lets `fill` stream into the temp file.
///
/// If `fill` fails the temp file is dropped and `path` is left as it was.
pub fn write_atomic_with<T, F>(path: &Path, fill: F) -> Result<T>
where
    F: FnOnce(&mut File) -> Result<T>,
{
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut tmp = NamedTempFile::new_in(parent)?;
    let value = fill(tmp.as_file_mut())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(value)
}
