use crate::commands::{CmdMessage, CmdResult};
use crate::covers::CoverStore;
use crate::error::Result;
use crate::model::Scope;
use crate::store::{Collection, DataStore};
use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

/// Inconsistencies between the library file and the cover directory.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DoctorReport {
    /// Books whose recorded cover file does not exist
    pub missing_covers: Vec<String>,
    /// Cover files no book refers to (the placeholder never counts)
    pub orphan_covers: Vec<PathBuf>,
}

impl DoctorReport {
    pub fn is_clean(&self) -> bool {
        self.missing_covers.is_empty() && self.orphan_covers.is_empty()
    }
}

pub fn inspect<S: DataStore>(store: &S, covers: &CoverStore, scope: Scope) -> Result<DoctorReport> {
    let collection = Collection::load(store, scope)?;
    let mut report = DoctorReport::default();
    let mut referenced = HashSet::new();
    referenced.insert(covers.placeholder_path());

    for book in collection.books() {
        let Some(image) = &book.image else {
            continue;
        };
        let full = covers.resolve(image);
        if full.is_file() {
            referenced.insert(full);
        } else {
            report.missing_covers.push(book.title.clone());
        }
    }

    report.orphan_covers = covers
        .stored_files()?
        .into_iter()
        .filter(|path| !referenced.contains(path))
        .collect();
    Ok(report)
}

/// Reports cover problems; with `fix`, clears dangling cover paths (so the
/// placeholder shows) and deletes orphaned files.
pub fn run<S: DataStore>(
    store: &mut S,
    covers: &CoverStore,
    scope: Scope,
    fix: bool,
) -> Result<CmdResult> {
    let report = inspect(&*store, covers, scope)?;
    let mut result = CmdResult::default();

    if report.is_clean() {
        result.add_message(CmdMessage::success("No inconsistencies found."));
        return Ok(result);
    }

    let heading = if fix {
        "Inconsistencies found and fixed:"
    } else {
        "Inconsistencies found (run with --fix to repair):"
    };
    result.add_message(CmdMessage::warning(heading));

    for title in &report.missing_covers {
        result.add_message(CmdMessage::info(format!(
            "  - Cover missing for \"{}\"",
            title
        )));
    }
    for path in &report.orphan_covers {
        result.add_message(CmdMessage::info(format!(
            "  - Unreferenced cover {}",
            path.display()
        )));
    }

    if !fix {
        return Ok(result);
    }

    if !report.missing_covers.is_empty() {
        let mut collection = Collection::load(store, scope)?;
        for book in collection.books_mut() {
            let dangling = book
                .image
                .as_ref()
                .is_some_and(|image| !covers.resolve(image).is_file());
            if dangling {
                book.image = None;
            }
        }
        collection.save(store, scope)?;
    }
    for path in &report.orphan_covers {
        fs::remove_file(path)?;
        tracing::debug!("Deleted orphan cover {}", path.display());
    }
    tracing::info!(
        "Doctor cleared {} cover path(s), deleted {} file(s)",
        report.missing_covers.len(),
        report.orphan_covers.len()
    );

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LibrisConfig;
    use crate::model::Book;
    use crate::store::memory::InMemoryStore;
    use image::{DynamicImage, ImageFormat, RgbImage};
    use std::io::Cursor;
    use tempfile::TempDir;

    fn png() -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(RgbImage::new(2, 2))
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    fn setup() -> (TempDir, CoverStore, InMemoryStore) {
        let dir = TempDir::new().unwrap();
        let covers = CoverStore::new(dir.path(), &LibrisConfig::default());
        let dune = covers.store_cover(&png(), "Dune").unwrap();
        covers.store_cover(&png(), "Forgotten").unwrap();

        let mut store = InMemoryStore::new();
        store
            .save_books(
                Scope::Project,
                &[
                    Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true).with_image(dune),
                    Book::new("Emma", "Jane Austen", 1815, "Classic", false)
                        .with_image("book_images/Emma.png"),
                ],
            )
            .unwrap();
        (dir, covers, store)
    }

    #[test]
    fn inspect_finds_both_kinds() {
        let (dir, covers, store) = setup();
        let report = inspect(&store, &covers, Scope::Project).unwrap();
        assert_eq!(report.missing_covers, vec!["Emma".to_string()]);
        assert_eq!(
            report.orphan_covers,
            vec![dir.path().join("book_images/Forgotten.png")]
        );
    }

    #[test]
    fn report_only_changes_nothing() {
        let (dir, covers, mut store) = setup();
        let saves = store.save_count();
        let result = run(&mut store, &covers, Scope::Project, false).unwrap();
        assert_eq!(result.messages.len(), 3);
        assert_eq!(store.save_count(), saves);
        assert!(dir.path().join("book_images/Forgotten.png").exists());
    }

    #[test]
    fn fix_repairs_library() {
        let (dir, covers, mut store) = setup();
        run(&mut store, &covers, Scope::Project, true).unwrap();

        let books = store.load_books(Scope::Project).unwrap();
        assert!(books[0].image.is_some());
        assert_eq!(books[1].image, None);
        assert!(!dir.path().join("book_images/Forgotten.png").exists());
        assert!(inspect(&store, &covers, Scope::Project).unwrap().is_clean());
    }

    #[test]
    fn placeholder_in_cover_dir_survives_fix() {
        let dir = TempDir::new().unwrap();
        let mut config = LibrisConfig::default();
        config.set("placeholder", "book_images/placeholder.png").unwrap();
        let covers = CoverStore::new(dir.path(), &config);
        let dune = covers.store_cover(&png(), "Dune").unwrap();
        std::fs::write(covers.placeholder_path(), png()).unwrap();

        let mut store = InMemoryStore::new();
        store
            .save_books(
                Scope::Project,
                &[Book::new("Dune", "Frank Herbert", 1965, "Sci-Fi", true).with_image(dune)],
            )
            .unwrap();

        assert!(inspect(&store, &covers, Scope::Project).unwrap().is_clean());
        run(&mut store, &covers, Scope::Project, true).unwrap();
        assert!(dir.path().join("book_images/placeholder.png").is_file());
    }

    #[test]
    fn clean_library() {
        let dir = TempDir::new().unwrap();
        let covers = CoverStore::new(dir.path(), &LibrisConfig::default());
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &covers, Scope::Project, true).unwrap();
        assert_eq!(result.messages[0].content, "No inconsistencies found.");
    }
}
