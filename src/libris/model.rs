use crate::error::{LibrisError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scope {
    Project,
    Global,
}

/// One book in the collection.
///
/// The title doubles as the lookup key. The field layout is the on-disk JSON shape,
/// so renaming a field here changes the file format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
    pub read: bool,
    /// Cover path relative to the library root. Written as `""` when absent.
    #[serde(default, with = "image_path")]
    pub image: Option<PathBuf>,
}

impl Book {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            genre: genre.into(),
            read,
            image: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<PathBuf>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn status_label(&self) -> &'static str {
        if self.read {
            "Read"
        } else {
            "To Read"
        }
    }

    /// Applies every field the patch carries. Does not touch the cover.
    pub fn apply(&mut self, patch: &BookPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(author) = &patch.author {
            self.author = author.clone();
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(genre) = &patch.genre {
            self.genre = genre.clone();
        }
        if let Some(read) = patch.read {
            self.read = read;
        }
    }
}

mod image_path {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::path::PathBuf;

    pub fn serialize<S: Serializer>(
        path: &Option<PathBuf>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        match path {
            Some(p) => serializer.serialize_str(&p.to_string_lossy()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Option<PathBuf>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        Ok(raw.filter(|s| !s.is_empty()).map(PathBuf::from))
    }
}

/// Raw user input for a new book, before validation.
///
/// `year` is kept as typed so that a non-numeric year can be rejected with a
/// validation error rather than a parse failure somewhere upstream.
#[derive(Debug, Clone, Default)]
pub struct BookDraft {
    pub title: String,
    pub author: String,
    pub year: String,
    pub genre: String,
    pub read: bool,
}

impl BookDraft {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: impl Into<String>,
        genre: impl Into<String>,
        read: bool,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: year.into(),
            genre: genre.into(),
            read,
        }
    }

    /// Checks required fields and converts into a [`Book`] without a cover.
    pub fn validate(&self) -> Result<Book> {
        let title = required("Title", &self.title)?;
        let author = required("Author", &self.author)?;
        let genre = required("Genre", &self.genre)?;
        let year = parse_year(&self.year)?;
        Ok(Book::new(title, author, year, genre, self.read))
    }
}

/// Replacement values for an existing book. `None` leaves the field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub read: Option<bool>,
}

impl BookPatch {
    pub fn is_empty(&self) -> bool {
        self == &BookPatch::default()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            required("Title", title)?;
        }
        if let Some(author) = &self.author {
            required("Author", author)?;
        }
        if let Some(genre) = &self.genre {
            required("Genre", genre)?;
        }
        Ok(())
    }
}

fn required<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(LibrisError::validation(format!("{} is required", field)));
    }
    Ok(value)
}

/// Parses a publication year. Only plain digits are accepted.
pub fn parse_year(raw: &str) -> Result<i32> {
    if raw.is_empty() || !raw.chars().all(|c| c.is_ascii_digit()) {
        return Err(LibrisError::validation(format!(
            "Year must be a number (YYYY), got \"{}\"",
            raw
        )));
    }
    raw.parse()
        .map_err(|_| LibrisError::validation(format!("Year out of range: {}", raw)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Title,
    Author,
    Year,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SortKey::Title),
            "author" => Ok(SortKey::Author),
            "year" => Ok(SortKey::Year),
            other => Err(format!(
                "Unknown sort key: {} (expected title, author or year)",
                other
            )),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Title => write!(f, "title"),
            SortKey::Author => write!(f, "author"),
            SortKey::Year => write!(f, "year"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Title,
    Author,
}

impl SearchField {
    pub fn value<'a>(&self, book: &'a Book) -> &'a str {
        match self {
            SearchField::Title => &book.title,
            SearchField::Author => &book.author,
        }
    }
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(SearchField::Title),
            "author" => Ok(SearchField::Author),
            other => Err(format!(
                "Unknown search field: {} (expected title or author)",
                other
            )),
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchField::Title => write!(f, "title"),
            SearchField::Author => write!(f, "author"),
        }
    }
}
