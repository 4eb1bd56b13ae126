use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelahError {
    #[error("Corpus unavailable: {0}")]
    CorpusUnavailable(String),

    #[error("Book not found: {0}")]
    BookNotFound(String),

    #[error("Chapter not found: {book} {chapter}")]
    ChapterNotFound { book: String, chapter: usize },

    #[error("Could not read '{key}' from storage: {reason}")]
    StorageRead { key: String, reason: String },

    #[error("Could not write '{key}' to storage: {reason}")]
    StorageWrite { key: String, reason: String },

    #[error("Invalid verse id: {0}")]
    InvalidVerseId(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Api Error: {0}")]
    Api(String),
}

impl SelahError {
    pub fn chapter_not_found(book: impl Into<String>, chapter: usize) -> Self {
        SelahError::ChapterNotFound {
            book: book.into(),
            chapter,
        }
    }
}

pub type Result<T> = std::result::Result<T, SelahError>;
