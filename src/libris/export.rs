//! Export formats: CSV and JSON documents, and a tar.gz backup with covers.

use crate::covers::CoverStore;
use crate::error::{LibrisError, Result};
use crate::model::Book;
use crate::store::fs::encode_library;
use flate2::write::GzEncoder;
use flate2::Compression;
use serde::Serialize;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
    Archive,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Archive => "tar.gz",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            "archive" | "tar" | "tar.gz" => Ok(ExportFormat::Archive),
            other => Err(format!(
                "Unknown export format: {} (expected csv, json or archive)",
                other
            )),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Csv => write!(f, "csv"),
            ExportFormat::Json => write!(f, "json"),
            ExportFormat::Archive => write!(f, "archive"),
        }
    }
}

#[derive(Serialize)]
struct CsvRow<'a> {
    title: &'a str,
    author: &'a str,
    year: i32,
    genre: &'a str,
    read: bool,
    image: String,
}

/// Renders the collection as CSV with a header row, in collection order.
pub fn to_csv(books: &[Book]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for book in books {
        writer.serialize(CsvRow {
            title: &book.title,
            author: &book.author,
            year: book.year,
            genre: &book.genre,
            read: book.read,
            image: book
                .image
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default(),
        })?;
    }
    if books.is_empty() {
        writer.write_record(["title", "author", "year", "genre", "read", "image"])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| LibrisError::Io(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| LibrisError::Store(e.to_string()))
}

/// Renders the collection as the same pretty JSON document the store writes.
pub fn to_json(books: &[Book]) -> Result<String> {
    let bytes = encode_library(books)?;
    String::from_utf8(bytes).map_err(|e| LibrisError::Store(e.to_string()))
}

/// What went into an archive.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ArchiveReport {
    pub books: usize,
    pub covers: usize,
    /// Titles whose cover file was missing
    pub skipped: Vec<String>,
}

/// Writes a gzip'd tar with `library.json` and every existing cover under `covers/`.
///
/// Cover paths inside the archive are the file names only, so the archive can be
/// unpacked anywhere.
pub fn write_archive<W: Write>(
    writer: W,
    books: &[Book],
    covers: &CoverStore,
) -> Result<ArchiveReport> {
    let enc = GzEncoder::new(writer, Compression::default());
    let mut tar = tar::Builder::new(enc);
    let mut report = ArchiveReport {
        books: books.len(),
        ..Default::default()
    };

    let library = encode_library(books)?;
    append_bytes(&mut tar, "library.json", &library)?;

    let mut seen: Vec<PathBuf> = Vec::new();
    for book in books {
        let Some(image) = &book.image else {
            continue;
        };
        let full = covers.resolve(image);
        if !full.is_file() {
            tracing::warn!("Skipping missing cover for {:?}", book.title);
            report.skipped.push(book.title.clone());
            continue;
        }
        if seen.contains(&full) {
            continue;
        }
        let Some(name) = full.file_name() else {
            continue;
        };
        let entry = PathBuf::from("covers").join(name);
        let mut file = std::fs::File::open(&full)?;
        tar.append_file(entry, &mut file)?;
        seen.push(full);
        report.covers += 1;
    }

    let enc = tar.into_inner()?;
    enc.finish()?;
    Ok(report)
}

fn append_bytes<W: Write>(tar: &mut tar::Builder<W>, name: &str, bytes: &[u8]) -> Result<()> {
    let mut header = tar::Header::new_gnu();
    header.set_size(bytes.len() as u64);
    header.set_mode(0o644);
    header.set_cksum();
    tar.append_data(&mut header, name, bytes)?;
    Ok(())
}
