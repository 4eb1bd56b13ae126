//! # Storage Layer
//!
//! Annotation state is persisted through the [`KeyValueStore`] trait: a small
//! load/save contract over a fixed set of logical keys. Values are JSON strings; the
//! store itself never interprets them.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: one `<key>.json` file per key inside a data directory.
//!   Writes go to a temporary file first and are renamed into place.
//! - [`memory::InMemoryStore`]: map-backed, no persistence. Used in tests.
//!
//! ## Storage Format
//!
//! ```text
//! <data dir>/
//! ├── highlights.json   # ["jhn-1-1", ...]
//! ├── bookmarks.json    # ["gn-1-3", ...]
//! ├── notes.json        # {"jhn-3-3": "born again", ...}
//! ├── fontSize.json     # 1.1
//! └── lastRead.json     # {"bookId": "jhn", "chapter": 3}
//! ```
//!
//! Each key is written independently. There is no transaction spanning keys.

use crate::error::Result;
use std::fmt;

pub mod fs;
pub mod memory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKey {
    Highlights,
    Bookmarks,
    Notes,
    FontSize,
    LastRead,
}

impl StorageKey {
    pub const ALL: [StorageKey; 5] = [
        StorageKey::Highlights,
        StorageKey::Bookmarks,
        StorageKey::Notes,
        StorageKey::FontSize,
        StorageKey::LastRead,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StorageKey::Highlights => "highlights",
            StorageKey::Bookmarks => "bookmarks",
            StorageKey::Notes => "notes",
            StorageKey::FontSize => "fontSize",
            StorageKey::LastRead => "lastRead",
        }
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Durable key-value storage for annotation state.
pub trait KeyValueStore {
    /// Read the raw value for `key`. `Ok(None)` means the key was never written.
    fn load(&self, key: StorageKey) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn save(&mut self, key: StorageKey, value: &str) -> Result<()>;
}
