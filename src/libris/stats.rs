use crate::model::Book;
use std::collections::BTreeMap;

/// Reading statistics over a collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LibraryStats {
    pub total: usize,
    pub read_count: usize,
    pub unread_count: usize,
    /// `100 * read / total`, or 0 for an empty collection
    pub read_percentage: f64,
    /// Books per genre, ordered by genre name
    pub genres: Vec<(String, usize)>,
}

pub fn compute(books: &[Book]) -> LibraryStats {
    let total = books.len();
    let read_count = books.iter().filter(|b| b.read).count();
    let read_percentage = if total > 0 {
        read_count as f64 / total as f64 * 100.0
    } else {
        0.0
    };

    let mut genres: BTreeMap<&str, usize> = BTreeMap::new();
    for book in books {
        *genres.entry(book.genre.as_str()).or_default() += 1;
    }

    LibraryStats {
        total,
        read_count,
        unread_count: total - read_count,
        read_percentage,
        genres: genres
            .into_iter()
            .map(|(genre, count)| (genre.to_string(), count))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(read: bool, genre: &str) -> Book {
        Book::new("T", "A", 2000, genre, read)
    }

    #[test]
    fn empty_collection_has_zero_percentage() {
        let stats = compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.read_count, 0);
        assert_eq!(stats.unread_count, 0);
        assert_eq!(stats.read_percentage, 0.0);
        assert!(stats.genres.is_empty());
    }

    #[test]
    fn two_of_three_read() {
        let stats = compute(&[book(true, "a"), book(false, "a"), book(true, "b")]);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.read_count, 2);
        assert_eq!(stats.unread_count, 1);
        assert!((stats.read_percentage - 66.67).abs() < 0.01);
    }

    #[test]
    fn counts_genres_in_name_order() {
        let stats = compute(&[book(true, "Sci-Fi"), book(false, "Classic"), book(true, "Sci-Fi")]);
        assert_eq!(
            stats.genres,
            vec![("Classic".to_string(), 1), ("Sci-Fi".to_string(), 2)]
        );
    }
}
