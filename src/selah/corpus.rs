//! # Corpus Loader
//!
//! The corpus is the full Bible text as a JSON array of books:
//!
//! ```text
//! [ { "abbrev": "gn", "book": "Genesis", "chapters": [ ["v1", "v2", ...], ... ] }, ... ]
//! ```
//!
//! Chapters and verses are positional: `chapters[0][0]` is chapter 1, verse 1.
//! Loading happens once per session and is synchronous. Anything that prevents a usable
//! corpus from being built (I/O, malformed JSON, no books) is reported as
//! [`SelahError::CorpusUnavailable`] so the caller can show a loading-failed state.

use crate::error::{Result, SelahError};
use crate::model::CorpusBook;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const BUNDLED_CORPUS: &str = include_str!("../../data/corpus.json");

/// Read access to corpus books, in canonical order.
///
/// Search and materialization only need this much of a corpus, which lets callers
/// supply their own source (and lets tests observe when the corpus is touched).
pub trait VerseSource {
    fn books(&self) -> &[CorpusBook];

    /// Find a book by abbreviation, ignoring case.
    fn find_book(&self, id: &str) -> Option<&CorpusBook> {
        let id = id.to_lowercase();
        self.books().iter().find(|b| b.id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Corpus {
    books: Vec<CorpusBook>,
}

impl Corpus {
    /// The sample corpus compiled into the crate.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CORPUS)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            SelahError::CorpusUnavailable(format!("{}: {}", path.display(), e))
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> Result<Self> {
        // Published Bible dumps frequently start with a byte-order mark.
        let content = content.trim_start_matches('\u{feff}');
        let raw: Vec<CorpusBook> = serde_json::from_str(content)
            .map_err(|e| SelahError::CorpusUnavailable(format!("malformed corpus: {}", e)))?;
        Self::from_books(raw)
    }

    pub fn from_books(raw: Vec<CorpusBook>) -> Result<Self> {
        if raw.is_empty() {
            return Err(SelahError::CorpusUnavailable(
                "corpus contains no books".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(raw.len());
        for book in raw {
            if seen.insert(book.id()) {
                books.push(book);
            } else {
                tracing::warn!(abbrev = %book.abbrev, name = %book.name, "dropping duplicate corpus book");
            }
        }

        tracing::debug!(books = books.len(), "corpus loaded");
        Ok(Self { books })
    }

    pub fn verse_count(&self) -> usize {
        self.books
            .iter()
            .flat_map(|b| b.chapters.iter())
            .map(Vec::len)
            .sum()
    }
}

impl VerseSource for Corpus {
    fn books(&self) -> &[CorpusBook] {
        &self.books
    }
}

impl VerseSource for [CorpusBook] {
    fn books(&self) -> &[CorpusBook] {
        self
    }
}

impl VerseSource for Vec<CorpusBook> {
    fn books(&self) -> &[CorpusBook] {
        self
    }
}
