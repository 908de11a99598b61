use crate::commands::CmdResult;
use crate::covers::CoverStore;
use crate::error::{LibrisError, Result};
use crate::model::Scope;
use crate::store::{Collection, DataStore};

/// Loads the cover of the first book titled `title` for inline display.
pub fn run<S: DataStore>(
    store: &S,
    covers: &CoverStore,
    scope: Scope,
    title: &str,
) -> Result<CmdResult> {
    let collection = Collection::load(store, scope)?;
    let book = collection
        .find(title)
        .ok_or_else(|| LibrisError::BookNotFound(title.to_string()))?;

    let cover = covers.to_displayable(book.image.as_deref())?;
    Ok(CmdResult::default()
        .with_listed_books(vec![book.clone()])
        .with_cover(cover))
}
