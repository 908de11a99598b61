use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::Scope;
use crate::stats::compute;
use crate::store::{Collection, DataStore};

pub fn run<S: DataStore>(store: &S, scope: Scope) -> Result<CmdResult> {
    let collection = Collection::load(store, scope)?;
    Ok(CmdResult::default().with_stats(compute(collection.books())))
}
