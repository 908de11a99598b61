use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Scope;
use crate::store::{Collection, DataStore};

/// Removes every book titled `title`. Cover files are left on disk; `doctor`
/// reports them as orphans.
pub fn run<S: DataStore>(store: &mut S, scope: Scope, title: &str) -> Result<CmdResult> {
    let mut collection = Collection::load(store, scope)?;
    let removed: Vec<_> = collection
        .books()
        .iter()
        .filter(|b| b.title == title)
        .cloned()
        .collect();

    let mut result = CmdResult::default();
    if collection.remove(title) == 0 {
        result.add_message(CmdMessage::warning(format!(
            "No book titled \"{}\"",
            title
        )));
        return Ok(result);
    }

    collection.save(store, scope)?;
    tracing::info!("Removed {} book(s) titled {:?}", removed.len(), title);

    let message = if removed.len() == 1 {
        format!("Book removed: {}", title)
    } else {
        format!("{} books removed: {}", removed.len(), title)
    };
    result.add_message(CmdMessage::success(message));
    Ok(result.with_affected_books(removed))
}
