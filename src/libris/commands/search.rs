use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Scope, SearchField, SortKey};
use crate::query::{search, sort_by};
use crate::store::{Collection, DataStore};

pub fn run<S: DataStore>(
    store: &S,
    scope: Scope,
    field: SearchField,
    query: &str,
    sort: Option<SortKey>,
) -> Result<CmdResult> {
    let collection = Collection::load(store, scope)?;
    let mut found = search(collection.books(), field, query)?;
    if let Some(key) = sort {
        found = sort_by(&found, key);
    }

    let mut result = CmdResult::default();
    if found.is_empty() {
        result.add_message(CmdMessage::info(format!(
            "No books with {} matching \"{}\"",
            field,
            query.trim()
        )));
    }
    Ok(result.with_listed_books(found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LibrisError;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn store() -> InMemoryStore {
        StoreFixture::new()
            .with_book("The Hobbit", "J.R.R. Tolkien", 1937, Scope::Project)
            .with_book("Hobbit Recipes", "A. Cook", 2010, Scope::Project)
            .with_book("Silmarillion", "J.R.R. Tolkien", 1977, Scope::Project)
            .store
    }

    #[test]
    fn finds_by_title_in_collection_order() {
        let result = run(&store(), Scope::Project, SearchField::Title, "hobbit", None).unwrap();
        let titles: Vec<_> = result.listed_books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["The Hobbit", "Hobbit Recipes"]);
    }

    #[test]
    fn sorts_results_when_asked() {
        let result = run(
            &store(),
            Scope::Project,
            SearchField::Title,
            "hobbit",
            Some(SortKey::Title),
        )
        .unwrap();
        assert_eq!(result.listed_books[0].title, "Hobbit Recipes");
    }

    #[test]
    fn finds_by_author() {
        let result = run(&store(), Scope::Project, SearchField::Author, "TOLKIEN", None).unwrap();
        assert_eq!(result.listed_books.len(), 2);
    }

    #[test]
    fn no_match_reports_info() {
        let result = run(&store(), Scope::Project, SearchField::Title, "dune", None).unwrap();
        assert!(result.listed_books.is_empty());
        assert_eq!(result.messages.len(), 1);
    }

    #[test]
    fn empty_query_is_rejected() {
        let err = run(&store(), Scope::Project, SearchField::Title, " ", None).unwrap_err();
        assert!(matches!(err, LibrisError::Validation(_)));
    }
}
