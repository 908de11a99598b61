use crate::commands::{CmdMessage, CmdResult};
use crate::covers::CoverStore;
use crate::error::Result;
use crate::export::{to_csv, to_json, write_archive, ExportFormat};
use crate::model::Scope;
use crate::store::fs::{write_atomic, write_atomic_with};
use crate::store::{Collection, DataStore};
use chrono::{DateTime, Local};
use std::io::{BufWriter, Write};
use std::path::Path;

/// File name used when no output path is given.
///
/// Archives carry a timestamp so successive backups don't replace each other.
pub fn default_filename(format: ExportFormat, now: DateTime<Local>) -> String {
    match format {
        ExportFormat::Archive => format!(
            "libris-{}.{}",
            now.format("%Y-%m-%d_%H-%M-%S"),
            format.extension()
        ),
        _ => format!("library.{}", format.extension()),
    }
}

pub fn run<S: DataStore>(
    store: &S,
    covers: &CoverStore,
    scope: Scope,
    format: ExportFormat,
    output: &Path,
) -> Result<CmdResult> {
    let collection = Collection::load(store, scope)?;
    let books = collection.books();
    let mut result = CmdResult::default();

    match format {
        ExportFormat::Csv => write_atomic(output, to_csv(books)?.as_bytes())?,
        ExportFormat::Json => write_atomic(output, to_json(books)?.as_bytes())?,
        ExportFormat::Archive => {
            let report = write_atomic_with(output, |file| {
                let mut buf = BufWriter::new(file);
                let report = write_archive(&mut buf, books, covers)?;
                buf.flush()?;
                Ok(report)
            })?;
            for title in &report.skipped {
                result.add_message(CmdMessage::warning(format!(
                    "Cover missing for \"{}\", not archived",
                    title
                )));
            }
            tracing::debug!("Archived {} covers", report.covers);
        }
    }

    tracing::info!("Exported {} books as {} to {}", books.len(), format, output.display());
    result.add_message(CmdMessage::success(format!(
        "Exported {} books to {}",
        books.len(),
        output.display()
    )));
    Ok(result.with_exported_path(output.to_path_buf()))
}
