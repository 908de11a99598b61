use super::DataStore;
use crate::error::Result;
use crate::model::{Book, Scope};
use std::collections::HashMap;
use std::path::PathBuf;

/// In-memory storage for testing and development.
/// Does NOT persist data.
#[derive(Default)]
pub struct InMemoryStore {
    books: HashMap<Scope, Vec<Book>>,
    saves: usize,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times a collection was saved. Lets tests assert that
    /// rejected actions leave storage untouched.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DataStore for InMemoryStore {
    fn load_books(&self, scope: Scope) -> Result<Vec<Book>> {
        Ok(self.books.get(&scope).cloned().unwrap_or_default())
    }

    fn save_books(&mut self, scope: Scope, books: &[Book]) -> Result<()> {
        self.books.insert(scope, books.to_vec());
        self.saves += 1;
        Ok(())
    }

    fn library_path(&self, scope: Scope) -> Result<PathBuf> {
        Ok(PathBuf::from(format!("memory://{:?}/library.json", scope)))
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        fn push(mut self, book: Book, scope: Scope) -> Self {
            let mut books = self.store.load_books(scope).unwrap();
            books.push(book);
            self.store.books.insert(scope, books);
            self
        }

        pub fn with_book(self, title: &str, author: &str, year: i32, scope: Scope) -> Self {
            self.push(Book::new(title, author, year, "Fiction", false), scope)
        }

        pub fn with_read_book(self, title: &str, author: &str, year: i32, scope: Scope) -> Self {
            self.push(Book::new(title, author, year, "Fiction", true), scope)
        }

        pub fn with_books(mut self, count: usize, scope: Scope) -> Self {
            for i in 0..count {
                let book = Book::new(
                    format!("Test Book {}", i + 1),
                    format!("Author {}", i + 1),
                    2000 + i as i32,
                    "Fiction",
                    i % 2 == 0,
                );
                self = self.push(book, scope);
            }
            self
        }
    }
}
