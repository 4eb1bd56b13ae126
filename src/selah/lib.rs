//! # Selah Architecture
//!
//! Selah is the **UI-agnostic core of a Bible reader**: book browsing, chapter
//! reading, full-text search and per-verse annotations. The terminal client in
//! `main.rs` is one UI over it; a mobile screen would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  UI Layer (main.rs, args.rs, logging.rs)                    │
//! │  - Parses arguments, renders chapters and lists             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: corpus, catalog, annotations, view     │
//! │  - Keeps the displayed chapter in step with annotations     │
//! │  - Clamps reader settings                                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core (corpus, catalog, chapter, search, navigation, share) │
//! │  - Plain functions and small state machines over Rust types │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (annotations, store/)                        │
//! │  - KeyValueStore trait: FileStore, InMemoryStore            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! The corpus is loaded once and indexed into a catalog. Chapters are materialized
//! from corpus text plus the current annotation state, and searches scan the corpus
//! directly. Annotation changes go to the store first; the API then rebuilds the
//! displayed chapter so it never shows stale flags.
//!
//! ## Verse Ids
//!
//! A verse is addressed as `<book>-<chapter>-<verse>` with the lowercased book
//! abbreviation and 1-based numbers (`jhn-3-16`). The id is derived from corpus
//! position only, so it is stable across sessions and is the key annotations are
//! stored under.
//!
//! ## Module Overview
//!
//! - [`api`]: The session facade, entry point for UIs
//! - [`corpus`]: Corpus loading and the [`corpus::VerseSource`] trait
//! - [`catalog`]: Book classification and grouping
//! - [`chapter`]: Chapter materialization
//! - [`search`]: Full-text search and search cancellation
//! - [`navigation`]: View-mode state machine
//! - [`annotations`]: Highlights, bookmarks, notes and reader settings
//! - [`store`]: Storage abstraction and implementations
//! - [`share`]: Share text for a verse
//! - [`config`]: Configuration file
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod annotations;
pub mod api;
pub mod catalog;
pub mod chapter;
pub mod config;
pub mod corpus;
pub mod error;
pub mod model;
pub mod navigation;
pub mod search;
pub mod share;
pub mod store;

#[cfg(test)]
pub mod test_utils;
