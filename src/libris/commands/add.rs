use crate::commands::{CmdMessage, CmdResult};
use crate::covers::CoverStore;
use crate::error::{LibrisError, Result};
use crate::model::{BookDraft, Scope};
use crate::store::{Collection, DataStore};

/// Validates the draft, stores its cover and appends the book.
///
/// Nothing is written unless every check passes, including decoding the cover.
pub fn run<S: DataStore>(
    store: &mut S,
    covers: &CoverStore,
    scope: Scope,
    draft: &BookDraft,
    cover: Option<&[u8]>,
) -> Result<CmdResult> {
    let mut book = draft.validate()?;
    let upload = cover.ok_or_else(|| LibrisError::validation("A cover image is required"))?;

    let mut collection = Collection::load(store, scope)?;
    let duplicate = collection.find(&book.title).is_some();

    book.image = Some(covers.store_cover(upload, &book.title)?);
    collection.add(book.clone());
    collection.save(store, scope)?;
    tracing::info!("Added {:?} ({} books)", book.title, collection.len());

    let mut result = CmdResult::default();
    if duplicate {
        result.add_message(CmdMessage::warning(format!(
            "Another book is already titled \"{}\"; edit and remove will treat them as one",
            book.title
        )));
    }
    result.add_message(CmdMessage::success(format!(
        "Book added: {} by {}",
        book.title, book.author
    )));
    Ok(result.with_affected_books(vec![book]))
}
