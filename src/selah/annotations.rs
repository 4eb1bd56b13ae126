//! # Annotation Store
//!
//! Per-verse user data (highlights, bookmarks, notes) plus the two reader settings that
//! survive a session (font size and last reading position).
//!
//! The store owns an injected [`KeyValueStore`] and keeps the full state in memory.
//! Every mutator changes memory first, then writes the one collection it touched.
//! A failed write is logged and otherwise ignored: the in-memory change stands and the
//! next successful write of that collection carries it to disk. Reads are equally
//! forgiving, a missing, unreadable or malformed key simply loads as its default.
//!
//! Range checks on the font size are the caller's business; see
//! [`crate::api::BibleApi::increase_font_size`].

use crate::error::Result;
use crate::model::LastRead;
use crate::store::{KeyValueStore, StorageKey};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_FONT_SIZE: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationState {
    pub highlights: BTreeSet<String>,
    pub bookmarks: BTreeSet<String>,
    pub notes: BTreeMap<String, String>,
    pub font_size: f32,
    pub last_read: Option<LastRead>,
}

impl Default for AnnotationState {
    fn default() -> Self {
        Self {
            highlights: BTreeSet::new(),
            bookmarks: BTreeSet::new(),
            notes: BTreeMap::new(),
            font_size: DEFAULT_FONT_SIZE,
            last_read: None,
        }
    }
}

impl AnnotationState {
    pub fn is_highlighted(&self, verse_id: &str) -> bool {
        self.highlights.contains(verse_id)
    }

    pub fn is_bookmarked(&self, verse_id: &str) -> bool {
        self.bookmarks.contains(verse_id)
    }

    pub fn note(&self, verse_id: &str) -> Option<&str> {
        self.notes.get(verse_id).map(String::as_str)
    }
}

pub struct AnnotationStore<S: KeyValueStore> {
    storage: S,
    state: AnnotationState,
}

impl<S: KeyValueStore> AnnotationStore<S> {
    /// Load every collection from `storage`, falling back to defaults per key.
    pub fn open(storage: S) -> Self {
        let defaults = AnnotationState::default();
        let state = AnnotationState {
            highlights: load_key(&storage, StorageKey::Highlights).unwrap_or_default(),
            bookmarks: load_key(&storage, StorageKey::Bookmarks).unwrap_or_default(),
            notes: load_key(&storage, StorageKey::Notes).unwrap_or_default(),
            font_size: load_key(&storage, StorageKey::FontSize).unwrap_or(defaults.font_size),
            last_read: load_key::<S, Option<LastRead>>(&storage, StorageKey::LastRead).flatten(),
        };
        tracing::debug!(
            highlights = state.highlights.len(),
            bookmarks = state.bookmarks.len(),
            notes = state.notes.len(),
            "annotations loaded"
        );
        Self { storage, state }
    }

    pub fn state(&self) -> &AnnotationState {
        &self.state
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Flip the highlight on a verse. Returns whether it is highlighted afterwards.
    pub fn toggle_highlight(&mut self, verse_id: &str) -> bool {
        let on = toggle(&mut self.state.highlights, verse_id);
        self.persist(StorageKey::Highlights);
        on
    }

    /// Flip the bookmark on a verse. Returns whether it is bookmarked afterwards.
    pub fn toggle_bookmark(&mut self, verse_id: &str) -> bool {
        let on = toggle(&mut self.state.bookmarks, verse_id);
        self.persist(StorageKey::Bookmarks);
        on
    }

    /// Save a note, or remove it when `text` is blank. Stored text is trimmed.
    pub fn set_note(&mut self, verse_id: &str, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            self.state.notes.remove(verse_id);
        } else {
            self.state
                .notes
                .insert(verse_id.to_string(), trimmed.to_string());
        }
        self.persist(StorageKey::Notes);
    }

    pub fn set_last_read(&mut self, book_id: &str, chapter: usize) {
        self.state.last_read = Some(LastRead {
            book_id: book_id.to_string(),
            chapter,
        });
        self.persist(StorageKey::LastRead);
    }

    pub fn set_font_size(&mut self, multiplier: f32) {
        self.state.font_size = multiplier;
        self.persist(StorageKey::FontSize);
    }

    /// Write every collection, stopping at the first failure.
    pub fn persist_all(&mut self) -> Result<()> {
        for key in StorageKey::ALL {
            self.write(key)?;
        }
        Ok(())
    }

    fn persist(&mut self, key: StorageKey) {
        if let Err(e) = self.write(key) {
            tracing::warn!(key = %key, error = %e, "failed to persist annotations");
        }
    }

    fn write(&mut self, key: StorageKey) -> Result<()> {
        let value = match key {
            StorageKey::Highlights => serde_json::to_string(&self.state.highlights)?,
            StorageKey::Bookmarks => serde_json::to_string(&self.state.bookmarks)?,
            StorageKey::Notes => serde_json::to_string(&self.state.notes)?,
            StorageKey::FontSize => serde_json::to_string(&self.state.font_size)?,
            StorageKey::LastRead => serde_json::to_string(&self.state.last_read)?,
        };
        self.storage.save(key, &value)
    }
}

fn toggle(set: &mut BTreeSet<String>, verse_id: &str) -> bool {
    if set.remove(verse_id) {
        false
    } else {
        set.insert(verse_id.to_string());
        true
    }
}

fn load_key<S: KeyValueStore, T: DeserializeOwned>(
    storage: &S,
    key: StorageKey,
) -> Option<T> {
    match storage.load(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "ignoring malformed stored value");
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            tracing::warn!(key = %key, error = %e, "failed to read annotations");
            None
        }
    }
}
