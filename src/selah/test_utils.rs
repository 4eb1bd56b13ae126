use crate::corpus::{Corpus, VerseSource};
use crate::model::CorpusBook;
use std::cell::Cell;

fn book(abbrev: &str, name: &str, chapters: Vec<Vec<&str>>) -> CorpusBook {
    CorpusBook {
        abbrev: abbrev.to_string(),
        name: name.to_string(),
        chapters: chapters
            .into_iter()
            .map(|verses| verses.into_iter().map(str::to_string).collect())
            .collect(),
    }
}

/// A single one-chapter book: John 1 with three verses.
pub fn john_corpus() -> Corpus {
    Corpus::from_books(vec![book(
        "jhn",
        "John",
        vec![vec!["In the beginning...", "v2 text", "v3 text"]],
    )])
    .expect("fixture corpus is valid")
}

/// Genesis (1 chapter) followed by John (3 chapters). "light" occurs exactly at
/// gn-1-3 and jhn-3-19.
pub fn genesis_john_corpus() -> Corpus {
    let mut john_3: Vec<String> = (1..=18).map(|v| format!("John three verse {}", v)).collect();
    john_3.push(
        "And this is the condemnation, that light is come into the world.".to_string(),
    );

    let mut john = book(
        "jhn",
        "John",
        vec![
            vec!["In the beginning was the Word."],
            vec!["And the third day there was a marriage in Cana of Galilee."],
        ],
    );
    john.chapters.push(john_3);

    Corpus::from_books(vec![
        book(
            "gn",
            "Genesis",
            vec![vec![
                "In the beginning God created the heaven and the earth.",
                "And the earth was without form, and void.",
                "And God said, Let there be light: and there was light.",
            ]],
        ),
        john,
    ])
    .expect("fixture corpus is valid")
}

/// Counts how often the wrapped corpus is accessed.
pub struct CountingSource {
    inner: Corpus,
    accesses: Cell<usize>,
}

impl CountingSource {
    pub fn new(inner: Corpus) -> Self {
        Self {
            inner,
            accesses: Cell::new(0),
        }
    }

    pub fn accesses(&self) -> usize {
        self.accesses.get()
    }
}

impl VerseSource for CountingSource {
    fn books(&self) -> &[CorpusBook] {
        self.accesses.set(self.accesses.get() + 1);
        self.inner.books()
    }
}
