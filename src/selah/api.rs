//! # API Facade
//!
//! [`BibleApi`] is the single entry point for a reader UI. It owns the corpus, the
//! book catalog, the annotation store and the navigator, and keeps the displayed
//! chapter in step with all of them:
//!
//! - entering a chapter materializes it and records it as the last read position;
//! - any annotation change on a verse of the displayed chapter rebuilds that chapter,
//!   so what is shown never lags behind the store;
//! - leaving the reading view drops the materialized chapter.
//!
//! A move whose chapter cannot be built is undone; the previous view stays.
//!
//! The facade is also where reader settings are range-checked. The font size is
//! clamped to `[FONT_SIZE_MIN, FONT_SIZE_MAX]` and moved in `FONT_SIZE_STEP`
//! increments here and nowhere else; the annotation store persists whatever it is
//! given.
//!
//! ## Generic Over KeyValueStore
//!
//! `BibleApi<S: KeyValueStore>` is generic over the storage backend:
//! - Production: `BibleApi<FileStore>`
//! - Testing: `BibleApi<InMemoryStore>`
//!
//! Like the layers below it, the API never prints. It returns data and errors.

use crate::annotations::{AnnotationState, AnnotationStore, DEFAULT_FONT_SIZE};
use crate::catalog::{BookGroup, Catalog};
use crate::chapter::materialize;
use crate::config::SelahConfig;
use crate::corpus::{Corpus, VerseSource};
use crate::error::{Result, SelahError};
use crate::model::{Book, Chapter, Verse, VerseId};
use crate::navigation::{NavState, Navigator};
use crate::search::{search_cancellable, SearchOptions, SearchOutcome, SearchSupervisor, SearchTicket};
use crate::share::compose_share_text_with;
use crate::store::KeyValueStore;
use std::collections::BTreeSet;
use std::sync::Arc;

pub const FONT_SIZE_MIN: f32 = 0.7;
pub const FONT_SIZE_MAX: f32 = 1.5;
pub const FONT_SIZE_STEP: f32 = 0.1;

pub struct BibleApi<S: KeyValueStore> {
    corpus: Arc<Corpus>,
    catalog: Catalog,
    annotations: AnnotationStore<S>,
    navigator: Navigator,
    current: Option<Chapter>,
    searches: SearchSupervisor,
    config: SelahConfig,
}

impl<S: KeyValueStore> BibleApi<S> {
    /// Open a reader session, resuming at the last read chapter when it still exists.
    pub fn new(corpus: Corpus, storage: S, config: SelahConfig) -> Self {
        let catalog = Catalog::new(&corpus);
        let annotations = AnnotationStore::open(storage);
        let navigator = Navigator::restore(&catalog, annotations.state().last_read.as_ref());

        let current = navigator
            .position()
            .and_then(|(book_id, chapter)| {
                materialize(book_id, chapter, &corpus, annotations.state()).ok()
            });

        Self {
            corpus: Arc::new(corpus),
            catalog,
            annotations,
            navigator,
            current,
            searches: SearchSupervisor::new(),
            config,
        }
    }

    pub fn state(&self) -> &NavState {
        self.navigator.state()
    }

    pub fn books(&self) -> &[Book] {
        self.catalog.books()
    }

    pub fn book(&self, id: &str) -> Option<&Book> {
        self.catalog.find(id)
    }

    pub fn book_groups(&self) -> Vec<BookGroup> {
        self.catalog.groups()
    }

    /// The chapter on screen, present only while reading.
    pub fn current_chapter(&self) -> Option<&Chapter> {
        self.current.as_ref()
    }

    pub fn annotations(&self) -> &AnnotationState {
        self.annotations.state()
    }

    pub fn config(&self) -> &SelahConfig {
        &self.config
    }

    /// Shared handle to the corpus, for searches run off the calling thread.
    pub fn corpus(&self) -> Arc<Corpus> {
        Arc::clone(&self.corpus)
    }

    pub fn into_storage(self) -> S {
        self.annotations.into_storage()
    }

    // --- Browsing ---

    pub fn select_book(&mut self, book_id: &str) -> Result<bool> {
        let moved = self.navigator.select_book(&self.catalog, book_id)?;
        if moved {
            self.current = None;
        }
        Ok(moved)
    }

    /// Pick a chapter of the book being listed. `None` when no book is listed.
    pub fn select_chapter(&mut self, chapter: usize) -> Result<Option<&Chapter>> {
        let previous = self.navigator.clone();
        if !self.navigator.select_chapter(&self.catalog, chapter)? {
            return Ok(None);
        }
        self.enter_chapter(previous).map(Some)
    }

    /// Jump straight to a chapter, whatever is showing.
    pub fn open_chapter(&mut self, book_id: &str, chapter: usize) -> Result<&Chapter> {
        let previous = self.navigator.clone();
        self.navigator.open(&self.catalog, book_id, chapter)?;
        self.enter_chapter(previous)
    }

    pub fn can_go_next(&self) -> bool {
        self.navigator.can_next(&self.catalog)
    }

    pub fn can_go_previous(&self) -> bool {
        self.navigator.can_prev()
    }

    /// Step forward one chapter. `None` at the last chapter or when not reading.
    pub fn next_chapter(&mut self) -> Result<Option<&Chapter>> {
        let previous = self.navigator.clone();
        if !self.navigator.next(&self.catalog) {
            return Ok(None);
        }
        self.enter_chapter(previous).map(Some)
    }

    /// Step back one chapter. `None` at the first chapter or when not reading.
    pub fn previous_chapter(&mut self) -> Result<Option<&Chapter>> {
        let previous = self.navigator.clone();
        if !self.navigator.prev() {
            return Ok(None);
        }
        self.enter_chapter(previous).map(Some)
    }

    pub fn back(&mut self) -> bool {
        let moved = self.navigator.back();
        if moved {
            self.current = None;
        }
        moved
    }

    /// Materialize the chapter the navigator just moved to. On failure the navigator
    /// is put back to `previous`, so a failed move leaves the view as it was.
    fn enter_chapter(&mut self, previous: Navigator) -> Result<&Chapter> {
        let built = match self.navigator.position() {
            Some((book_id, chapter)) => {
                materialize(book_id, chapter, &*self.corpus, self.annotations.state())
            }
            None => Err(SelahError::Api("Not reading a chapter".to_string())),
        };
        let materialized = match built {
            Ok(materialized) => materialized,
            Err(e) => {
                self.navigator = previous;
                return Err(e);
            }
        };

        let (book_id, chapter) = (materialized.book_id.clone(), materialized.chapter);
        self.annotations.set_last_read(&book_id, chapter);
        tracing::debug!(book = %book_id, chapter, "entered chapter");
        Ok(&*self.current.insert(materialized))
    }

    // --- Search ---

    pub fn activate_search(&mut self) {
        self.searches.cancel_all();
        self.navigator.activate_search();
        self.current = None;
    }

    pub fn deactivate_search(&mut self) -> bool {
        self.searches.cancel_all();
        self.navigator.deactivate_search()
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: self.config.search_limit,
        }
    }

    /// Run a query on the calling thread and show its results, entering search mode
    /// first if needed.
    pub fn search(&mut self, query: &str) -> SearchOutcome {
        if !matches!(self.navigator.state(), NavState::Searching { .. }) {
            self.activate_search();
        }
        let ticket = self.begin_search();
        let outcome = search_cancellable(query, &*self.corpus, &self.search_options(), &ticket)
            .unwrap_or_default();
        self.apply_search_results(&ticket, query, outcome.clone());
        outcome
    }

    /// Start a search whose scan will run elsewhere; supersedes any search in flight.
    pub fn begin_search(&self) -> SearchTicket {
        self.searches.begin()
    }

    /// Show results of a search started with [`Self::begin_search`]. Results from a
    /// superseded search are dropped and `false` is returned.
    pub fn apply_search_results(
        &mut self,
        ticket: &SearchTicket,
        query: &str,
        outcome: SearchOutcome,
    ) -> bool {
        if !ticket.is_current() {
            tracing::debug!(query, "discarding results of a superseded search");
            return false;
        }
        self.navigator.show_results(query, outcome.results)
    }

    /// Open the chapter of the `index`-th result (0-based) of the current search.
    pub fn select_result(&mut self, index: usize) -> Result<Option<&Chapter>> {
        let previous = self.navigator.clone();
        if self.navigator.select_result(&self.catalog, index)?.is_none() {
            return Ok(None);
        }
        self.enter_chapter(previous)?;
        self.searches.cancel_all();
        Ok(self.current.as_ref())
    }

    // --- Annotations ---

    pub fn toggle_highlight(&mut self, verse_id: &str) -> Result<bool> {
        let id = self.resolve_verse(verse_id)?;
        let on = self.annotations.toggle_highlight(&id.to_string());
        self.redecorate(&id)?;
        Ok(on)
    }

    pub fn toggle_bookmark(&mut self, verse_id: &str) -> Result<bool> {
        let id = self.resolve_verse(verse_id)?;
        let on = self.annotations.toggle_bookmark(&id.to_string());
        self.redecorate(&id)?;
        Ok(on)
    }

    /// Save a note on a verse; blank text removes it.
    pub fn set_note(&mut self, verse_id: &str, text: &str) -> Result<()> {
        let id = self.resolve_verse(verse_id)?;
        self.annotations.set_note(&id.to_string(), text);
        self.redecorate(&id)
    }

    /// Every verse carrying a highlight, bookmark or note, in canonical order.
    pub fn annotated_verses(&self) -> Vec<Verse> {
        let state = self.annotations.state();
        let ids: BTreeSet<&String> = state
            .highlights
            .iter()
            .chain(state.bookmarks.iter())
            .chain(state.notes.keys())
            .collect();

        let mut located: Vec<(usize, VerseId, String)> = ids
            .into_iter()
            .filter_map(|raw| {
                let id: VerseId = raw.parse().ok()?;
                let (book_idx, book) = self
                    .corpus
                    .books()
                    .iter()
                    .enumerate()
                    .find(|(_, b)| b.id() == id.book_id)?;
                let text = book.chapters.get(id.chapter - 1)?.get(id.verse - 1)?.clone();
                Some((book_idx, id, text))
            })
            .collect();
        located.sort_by_key(|(book_idx, id, _)| (*book_idx, id.chapter, id.verse));

        located
            .into_iter()
            .map(|(_, id, text)| {
                let key = id.to_string();
                Verse {
                    is_highlighted: state.is_highlighted(&key),
                    is_bookmarked: state.is_bookmarked(&key),
                    note: state.note(&key).map(str::to_string),
                    verse_number: id.verse,
                    text,
                    id: key,
                }
            })
            .collect()
    }

    /// Check that a verse id names a real verse and normalize it.
    fn resolve_verse(&self, verse_id: &str) -> Result<VerseId> {
        let id: VerseId = verse_id.parse()?;
        let book = self
            .corpus
            .find_book(&id.book_id)
            .ok_or_else(|| SelahError::BookNotFound(id.book_id.clone()))?;
        let verses = book
            .chapters
            .get(id.chapter - 1)
            .ok_or_else(|| SelahError::chapter_not_found(&id.book_id, id.chapter))?;
        if id.verse > verses.len() {
            return Err(SelahError::InvalidVerseId(verse_id.to_string()));
        }
        Ok(id)
    }

    /// Rebuild the displayed chapter if `id` belongs to it.
    fn redecorate(&mut self, id: &VerseId) -> Result<()> {
        let on_screen = self
            .current
            .as_ref()
            .is_some_and(|c| c.book_id == id.book_id && c.chapter == id.chapter);
        if on_screen {
            self.current = Some(materialize(
                &id.book_id,
                id.chapter,
                &*self.corpus,
                self.annotations.state(),
            )?);
        }
        Ok(())
    }

    // --- Sharing ---

    pub fn share_verse(&self, verse_id: &str) -> Result<String> {
        let id = self.resolve_verse(verse_id)?;
        let chapter = materialize(&id.book_id, id.chapter, &*self.corpus, self.annotations.state())?;
        let verse = chapter
            .verse(id.verse)
            .ok_or_else(|| SelahError::InvalidVerseId(verse_id.to_string()))?;
        Ok(compose_share_text_with(verse, &chapter, &self.config.attribution))
    }

    // --- Reader settings ---

    pub fn font_size(&self) -> f32 {
        self.annotations.state().font_size
    }

    pub fn increase_font_size(&mut self) -> f32 {
        self.apply_font_size(self.font_size() + FONT_SIZE_STEP)
    }

    pub fn decrease_font_size(&mut self) -> f32 {
        self.apply_font_size(self.font_size() - FONT_SIZE_STEP)
    }

    pub fn reset_font_size(&mut self) -> f32 {
        self.apply_font_size(DEFAULT_FONT_SIZE)
    }

    fn apply_font_size(&mut self, requested: f32) -> f32 {
        let size = clamp_font_size(requested);
        if size != self.font_size() {
            self.annotations.set_font_size(size);
        }
        size
    }
}

/// Clamp to the supported range and snap to the step grid.
pub fn clamp_font_size(requested: f32) -> f32 {
    // One decimal place, so repeated steps do not accumulate float error.
    let snapped = (requested * 10.0).round() / 10.0;
    snapped.clamp(FONT_SIZE_MIN, FONT_SIZE_MAX)
}
