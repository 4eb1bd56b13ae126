//! # Search Engine
//!
//! Full-corpus, case-insensitive substring search. Results come back in canonical
//! order (book, then chapter, then verse); that order is the only ranking.
//!
//! A blank query returns nothing without touching the corpus.
//!
//! ## Cancellation
//!
//! A scan is linear in the size of the corpus. UIs that run it off their event thread
//! take a [`SearchTicket`] from a [`SearchSupervisor`] first. Starting a newer search
//! makes every older ticket stale: a stale scan gives up at the next chapter boundary
//! and returns `None`, and [`SearchTicket::is_current`] lets the caller drop results
//! that finished too late.

use crate::corpus::VerseSource;
use crate::model::{SearchResult, VerseId};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Stop after this many results. `None` returns every match.
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub results: Vec<SearchResult>,
    /// More matches existed beyond `limit`.
    pub truncated: bool,
}

/// Hands out search tickets; the most recent ticket is the only current one.
#[derive(Debug, Clone, Default)]
pub struct SearchSupervisor {
    latest: Arc<AtomicU64>,
}

impl SearchSupervisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new search, making all earlier tickets stale.
    pub fn begin(&self) -> SearchTicket {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        SearchTicket {
            generation,
            latest: Arc::clone(&self.latest),
        }
    }

    /// Make every outstanding ticket stale.
    pub fn cancel_all(&self) {
        self.latest.fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct SearchTicket {
    generation: u64,
    latest: Arc<AtomicU64>,
}

impl SearchTicket {
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::SeqCst) == self.generation
    }
}

/// Search the whole corpus, returning every match.
pub fn search<V: VerseSource + ?Sized>(query: &str, source: &V) -> Vec<SearchResult> {
    search_with(query, source, &SearchOptions::default()).results
}

pub fn search_with<V: VerseSource + ?Sized>(
    query: &str,
    source: &V,
    options: &SearchOptions,
) -> SearchOutcome {
    scan(query, source, options, None).unwrap_or_default()
}

/// Like [`search_with`], but abandons the scan once `ticket` goes stale.
pub fn search_cancellable<V: VerseSource + ?Sized>(
    query: &str,
    source: &V,
    options: &SearchOptions,
    ticket: &SearchTicket,
) -> Option<SearchOutcome> {
    scan(query, source, options, Some(ticket))
}

fn scan<V: VerseSource + ?Sized>(
    query: &str,
    source: &V,
    options: &SearchOptions,
    ticket: Option<&SearchTicket>,
) -> Option<SearchOutcome> {
    if query.trim().is_empty() {
        return Some(SearchOutcome::default());
    }

    let needle = query.to_lowercase();
    let mut outcome = SearchOutcome::default();

    'books: for book in source.books() {
        let book_id = book.id();
        for (chapter_idx, verses) in book.chapters.iter().enumerate() {
            if ticket.is_some_and(|t| !t.is_current()) {
                tracing::debug!(query, "search superseded");
                return None;
            }
            for (verse_idx, text) in verses.iter().enumerate() {
                if !text.to_lowercase().contains(&needle) {
                    continue;
                }
                if options.limit.is_some_and(|limit| outcome.results.len() >= limit) {
                    outcome.truncated = true;
                    break 'books;
                }
                let (chapter, verse) = (chapter_idx + 1, verse_idx + 1);
                outcome.results.push(SearchResult {
                    id: VerseId::new(book_id.as_str(), chapter, verse).to_string(),
                    book_id: book_id.clone(),
                    book_name: book.name.clone(),
                    chapter,
                    verse,
                    text: text.clone(),
                });
            }
        }
    }

    tracing::debug!(
        query,
        results = outcome.results.len(),
        truncated = outcome.truncated,
        "search finished"
    );
    Some(outcome)
}
