use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Scope, SortKey};
use crate::query::sort_by;
use crate::store::{Collection, DataStore};

pub fn run<S: DataStore>(store: &S, scope: Scope, sort: SortKey) -> Result<CmdResult> {
    let collection = Collection::load(store, scope)?;
    let listed = sort_by(collection.books(), sort);
    Ok(CmdResult::default().with_listed_books(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn lists_sorted_by_year() {
        let store = StoreFixture::new()
            .with_book("Dune", "Frank Herbert", 1965, Scope::Project)
            .with_book("Emma", "Jane Austen", 1815, Scope::Project)
            .store;

        let result = run(&store, Scope::Project, SortKey::Year).unwrap();
        let titles: Vec<_> = result.listed_books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Emma", "Dune"]);
    }

    #[test]
    fn sorting_does_not_touch_storage_order() {
        let store = StoreFixture::new()
            .with_book("Dune", "Frank Herbert", 1965, Scope::Project)
            .with_book("Emma", "Jane Austen", 1815, Scope::Project)
            .store;

        run(&store, Scope::Project, SortKey::Year).unwrap();
        let stored = store.load_books(Scope::Project).unwrap();
        assert_eq!(stored[0].title, "Dune");
    }

    #[test]
    fn empty_library_lists_nothing() {
        let store = StoreFixture::new().store;
        let result = run(&store, Scope::Project, SortKey::Title).unwrap();
        assert!(result.listed_books.is_empty());
    }
}
