use super::DataStore;
use crate::error::Result;
use crate::model::{Book, BookPatch, Scope};

/// The in-memory book collection, kept in insertion order.
///
/// Mutations only touch memory; [`Collection::save`] is the single point where
/// changes become durable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collection {
    books: Vec<Book>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books(books: Vec<Book>) -> Self {
        Self { books }
    }

    pub fn load<S: DataStore>(store: &S, scope: Scope) -> Result<Self> {
        Ok(Self::from_books(store.load_books(scope)?))
    }

    pub fn save<S: DataStore>(&self, store: &mut S, scope: Scope) -> Result<()> {
        store.save_books(scope, &self.books)
    }

    pub fn add(&mut self, book: Book) {
        self.books.push(book);
    }

    /// Applies `patch` to the first book titled `title`.
    ///
    /// Returns the updated book, or `None` (leaving the collection untouched) if no
    /// book has that title.
    pub fn update(&mut self, title: &str, patch: &BookPatch) -> Option<&mut Book> {
        let book = self.find_mut(title)?;
        book.apply(patch);
        Some(book)
    }

    /// Removes every book titled `title` and returns how many were dropped.
    pub fn remove(&mut self, title: &str) -> usize {
        let before = self.books.len();
        self.books.retain(|b| b.title != title);
        before - self.books.len()
    }

    pub fn find(&self, title: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.title == title)
    }

    pub fn find_mut(&mut self, title: &str) -> Option<&mut Book> {
        self.books.iter_mut().find(|b| b.title == title)
    }

    pub fn titles(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.title.as_str()).collect()
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn books_mut(&mut self) -> &mut [Book] {
        &mut self.books
    }

    pub fn into_books(self) -> Vec<Book> {
        self.books
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}
