use thiserror::Error;

#[derive(Error, Debug)]
pub enum LibrisError {
    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Store error: {0}")]
    Store(String),
}

impl LibrisError {
    pub fn validation(message: impl Into<String>) -> Self {
        LibrisError::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, LibrisError>;
