use crate::commands::{CmdMessage, CmdResult};
use crate::covers::CoverStore;
use crate::error::{LibrisError, Result};
use crate::model::{BookPatch, Scope};
use crate::store::{Collection, DataStore};

/// Updates the first book titled `title`, optionally replacing its cover.
///
/// A new cover is filed under the book's title after the patch, so renaming a book
/// and uploading a cover in one edit names the file after the new title.
pub fn run<S: DataStore>(
    store: &mut S,
    covers: &CoverStore,
    scope: Scope,
    title: &str,
    patch: &BookPatch,
    cover: Option<&[u8]>,
) -> Result<CmdResult> {
    patch.validate()?;
    if patch.is_empty() && cover.is_none() {
        return Err(LibrisError::validation("Nothing to update"));
    }

    let mut collection = Collection::load(store, scope)?;
    if collection.find(title).is_none() {
        return Err(LibrisError::BookNotFound(title.to_string()));
    }

    let new_cover = match cover {
        Some(upload) => {
            let cover_title = patch.title.as_deref().unwrap_or(title);
            Some(covers.store_cover(upload, cover_title)?)
        }
        None => None,
    };

    let book = collection
        .update(title, patch)
        .ok_or_else(|| LibrisError::BookNotFound(title.to_string()))?;
    if let Some(path) = new_cover {
        book.image = Some(path);
    }
    let updated = book.clone();

    collection.save(store, scope)?;
    tracing::info!("Updated {:?}", updated.title);

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Book updated: {}", updated.title)));
    Ok(result.with_affected_books(vec![updated]))
}
