use crate::error::{Result, SelahError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Testament {
    Old,
    New,
}

impl fmt::Display for Testament {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Testament::Old => write!(f, "old"),
            Testament::New => write!(f, "new"),
        }
    }
}

/// A book as it appears in the bundled corpus asset.
///
/// `chapters[n]` holds chapter `n + 1`; each chapter is the ordered list of its verse
/// texts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusBook {
    pub abbrev: String,
    #[serde(rename = "book")]
    pub name: String,
    pub chapters: Vec<Vec<String>>,
}

impl CorpusBook {
    /// The stable book id: the lowercased abbreviation.
    pub fn id(&self) -> String {
        self.abbrev.to_lowercase()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub name: String,
    pub abbrev: String,
    pub chapter_count: usize,
    pub testament: Testament,
    pub category: String,
}

impl Book {
    pub fn has_chapter(&self, chapter: usize) -> bool {
        (1..=self.chapter_count).contains(&chapter)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub id: String,
    pub verse_number: usize,
    pub text: String,
    pub is_highlighted: bool,
    pub is_bookmarked: bool,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub book_id: String,
    pub book_name: String,
    pub chapter: usize,
    pub verses: Vec<Verse>,
}

impl Chapter {
    pub fn verse(&self, verse_number: usize) -> Option<&Verse> {
        verse_number
            .checked_sub(1)
            .and_then(|idx| self.verses.get(idx))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub book_id: String,
    pub book_name: String,
    pub chapter: usize,
    pub verse: usize,
    pub text: String,
}

/// Reading position restored on the next session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastRead {
    pub book_id: String,
    pub chapter: usize,
}

/// The join key between corpus text and annotations: `<book>-<chapter>-<verse>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VerseId {
    pub book_id: String,
    pub chapter: usize,
    pub verse: usize,
}

impl VerseId {
    pub fn new(book_id: impl Into<String>, chapter: usize, verse: usize) -> Self {
        Self {
            book_id: book_id.into().to_lowercase(),
            chapter,
            verse,
        }
    }
}

impl fmt::Display for VerseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.book_id, self.chapter, self.verse)
    }
}

impl FromStr for VerseId {
    type Err = SelahError;

    fn from_str(s: &str) -> Result<Self> {
        // Split from the right: chapter and verse are numeric, the book id is whatever
        // remains.
        let mut parts = s.rsplitn(3, '-');
        let verse = parts.next().and_then(|v| v.parse::<usize>().ok());
        let chapter = parts.next().and_then(|c| c.parse::<usize>().ok());
        let book = parts.next().filter(|b| !b.is_empty());

        match (book, chapter, verse) {
            (Some(book), Some(chapter), Some(verse)) if chapter > 0 && verse > 0 => {
                Ok(VerseId::new(book, chapter, verse))
            }
            _ => Err(SelahError::InvalidVerseId(s.to_string())),
        }
    }
}
