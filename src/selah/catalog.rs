//! # Book Catalog
//!
//! Turns raw corpus books into [`Book`] records classified by testament and category,
//! and groups them for list display.
//!
//! Classification is table-driven: the 66 canonical book names map to a fixed
//! `(testament, category)` pair. A name missing from the table is classified as
//! `New` / `"Other"` without any further inspection. That fallback is known to be
//! wrong for Old Testament books with unusual names; it is kept as-is because the
//! correct treatment of unmapped books is a product decision, and a warning is logged
//! whenever it fires.

use crate::corpus::VerseSource;
use crate::model::{Book, Testament};
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const OTHER_CATEGORY: &str = "Other";

const CLASSIFICATION: &[(&str, Testament, &str)] = &[
    ("genesis", Testament::Old, "Pentateuch"),
    ("exodus", Testament::Old, "Pentateuch"),
    ("leviticus", Testament::Old, "Pentateuch"),
    ("numbers", Testament::Old, "Pentateuch"),
    ("deuteronomy", Testament::Old, "Pentateuch"),
    ("joshua", Testament::Old, "Historical"),
    ("judges", Testament::Old, "Historical"),
    ("ruth", Testament::Old, "Historical"),
    ("1 samuel", Testament::Old, "Historical"),
    ("2 samuel", Testament::Old, "Historical"),
    ("1 kings", Testament::Old, "Historical"),
    ("2 kings", Testament::Old, "Historical"),
    ("1 chronicles", Testament::Old, "Historical"),
    ("2 chronicles", Testament::Old, "Historical"),
    ("ezra", Testament::Old, "Historical"),
    ("nehemiah", Testament::Old, "Historical"),
    ("esther", Testament::Old, "Historical"),
    ("job", Testament::Old, "Wisdom"),
    ("psalms", Testament::Old, "Wisdom"),
    ("proverbs", Testament::Old, "Wisdom"),
    ("ecclesiastes", Testament::Old, "Wisdom"),
    ("song of solomon", Testament::Old, "Wisdom"),
    ("isaiah", Testament::Old, "Major Prophets"),
    ("jeremiah", Testament::Old, "Major Prophets"),
    ("lamentations", Testament::Old, "Major Prophets"),
    ("ezekiel", Testament::Old, "Major Prophets"),
    ("daniel", Testament::Old, "Major Prophets"),
    ("hosea", Testament::Old, "Minor Prophets"),
    ("joel", Testament::Old, "Minor Prophets"),
    ("amos", Testament::Old, "Minor Prophets"),
    ("obadiah", Testament::Old, "Minor Prophets"),
    ("jonah", Testament::Old, "Minor Prophets"),
    ("micah", Testament::Old, "Minor Prophets"),
    ("nahum", Testament::Old, "Minor Prophets"),
    ("habakkuk", Testament::Old, "Minor Prophets"),
    ("zephaniah", Testament::Old, "Minor Prophets"),
    ("haggai", Testament::Old, "Minor Prophets"),
    ("zechariah", Testament::Old, "Minor Prophets"),
    ("malachi", Testament::Old, "Minor Prophets"),
    ("matthew", Testament::New, "Gospels"),
    ("mark", Testament::New, "Gospels"),
    ("luke", Testament::New, "Gospels"),
    ("john", Testament::New, "Gospels"),
    ("acts", Testament::New, "History"),
    ("romans", Testament::New, "Pauline Epistles"),
    ("1 corinthians", Testament::New, "Pauline Epistles"),
    ("2 corinthians", Testament::New, "Pauline Epistles"),
    ("galatians", Testament::New, "Pauline Epistles"),
    ("ephesians", Testament::New, "Pauline Epistles"),
    ("philippians", Testament::New, "Pauline Epistles"),
    ("colossians", Testament::New, "Pauline Epistles"),
    ("1 thessalonians", Testament::New, "Pauline Epistles"),
    ("2 thessalonians", Testament::New, "Pauline Epistles"),
    ("1 timothy", Testament::New, "Pauline Epistles"),
    ("2 timothy", Testament::New, "Pauline Epistles"),
    ("titus", Testament::New, "Pauline Epistles"),
    ("philemon", Testament::New, "Pauline Epistles"),
    ("hebrews", Testament::New, "General Epistles"),
    ("james", Testament::New, "General Epistles"),
    ("1 peter", Testament::New, "General Epistles"),
    ("2 peter", Testament::New, "General Epistles"),
    ("1 john", Testament::New, "General Epistles"),
    ("2 john", Testament::New, "General Epistles"),
    ("3 john", Testament::New, "General Epistles"),
    ("jude", Testament::New, "General Epistles"),
    ("revelation", Testament::New, "Prophecy"),
];

static CLASSIFICATION_BY_NAME: Lazy<HashMap<&'static str, (Testament, &'static str)>> =
    Lazy::new(|| {
        CLASSIFICATION
            .iter()
            .map(|(name, testament, category)| (*name, (*testament, *category)))
            .collect()
    });

/// Look up the static classification for a book name (case and surrounding
/// whitespace are ignored). Returns `None` for names outside the canonical 66.
pub fn classify(name: &str) -> Option<(Testament, &'static str)> {
    let key = name.trim().to_lowercase();
    CLASSIFICATION_BY_NAME.get(key.as_str()).copied()
}

/// Build one [`Book`] per corpus book, in corpus order.
pub fn index<V: VerseSource + ?Sized>(corpus: &V) -> Vec<Book> {
    corpus
        .books()
        .iter()
        .map(|raw| {
            let (testament, category) = classify(&raw.name).unwrap_or_else(|| {
                tracing::warn!(book = %raw.name, "book missing from classification table");
                (Testament::New, OTHER_CATEGORY)
            });
            Book {
                id: raw.id(),
                name: raw.name.clone(),
                abbrev: raw.abbrev.clone(),
                chapter_count: raw.chapters.len(),
                testament,
                category: category.to_string(),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookGroup {
    /// `"<testament>-<category>"`, e.g. `"old-Pentateuch"`.
    pub key: String,
    pub testament: Testament,
    pub category: String,
    pub books: Vec<Book>,
}

/// Group books by testament and category.
///
/// Groups appear in the order their first book appears; books keep their corpus order
/// within a group.
pub fn group(books: &[Book]) -> Vec<BookGroup> {
    let mut groups: Vec<BookGroup> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for book in books {
        let key = format!("{}-{}", book.testament, book.category);
        match positions.get(&key) {
            Some(&pos) => groups[pos].books.push(book.clone()),
            None => {
                positions.insert(key.clone(), groups.len());
                groups.push(BookGroup {
                    key,
                    testament: book.testament,
                    category: book.category.clone(),
                    books: vec![book.clone()],
                });
            }
        }
    }

    groups
}

/// The indexed books of a corpus with lookup helpers.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    books: Vec<Book>,
}

impl Catalog {
    pub fn new<V: VerseSource + ?Sized>(corpus: &V) -> Self {
        Self {
            books: index(corpus),
        }
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn find(&self, id: &str) -> Option<&Book> {
        let id = id.to_lowercase();
        self.books.iter().find(|b| b.id == id)
    }

    pub fn groups(&self) -> Vec<BookGroup> {
        group(&self.books)
    }
}
