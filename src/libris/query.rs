//! Sorting and searching. Both scan the whole collection; there is no index.

use crate::error::{LibrisError, Result};
use crate::model::{Book, SearchField, SortKey};

/// Returns the books ordered ascending by `key`.
///
/// Strings compare lexicographically by code point, years numerically. The sort is
/// stable: books with equal keys keep their relative order.
pub fn sort_by(books: &[Book], key: SortKey) -> Vec<Book> {
    let mut sorted = books.to_vec();
    match key {
        SortKey::Title => sorted.sort_by(|a, b| a.title.cmp(&b.title)),
        SortKey::Author => sorted.sort_by(|a, b| a.author.cmp(&b.author)),
        SortKey::Year => sorted.sort_by_key(|b| b.year),
    }
    sorted
}

/// Case-insensitive substring search over one field.
///
/// A blank query is rejected rather than treated as "match everything". No match
/// is an empty result, not an error.
pub fn search(books: &[Book], field: SearchField, query: &str) -> Result<Vec<Book>> {
    if query.trim().is_empty() {
        return Err(LibrisError::validation("Search query cannot be empty"));
    }

    let needle = query.to_lowercase();
    Ok(books
        .iter()
        .filter(|book| field.value(book).to_lowercase().contains(&needle))
        .cloned()
        .collect())
}
