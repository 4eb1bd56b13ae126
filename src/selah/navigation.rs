//! # Navigation
//!
//! The reader is always in exactly one of four view modes:
//!
//! ```text
//!                 select_book            select_chapter
//!  ListingBooks ──────────────▶ ListingChapters ──────────▶ ReadingChapter ◀─┐
//!       ▲         ◀────────────                 ◀────────── │     │ next/prev
//!       │              back                         back    └─────┘
//!       │ deactivate_search                                      ▲
//!  Searching ────────────────────────────────────────────────────┘
//!      ▲                      select_result
//!      └── activate_search (from any state)
//! ```
//!
//! Leaving search always lands on the book list, not on whatever was showing before
//! the search started.
//!
//! A transition fired from a state that does not offer it is a no-op and reports
//! `false`, the same way a disabled button does nothing. So is stepping past the first
//! or last chapter. Unknown books and chapters are errors and leave the state untouched.

use crate::catalog::Catalog;
use crate::error::{Result, SelahError};
use crate::model::{LastRead, SearchResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavState {
    ListingBooks,
    ListingChapters { book_id: String },
    ReadingChapter { book_id: String, chapter: usize },
    Searching { query: String, results: Vec<SearchResult> },
}

#[derive(Debug, Clone)]
pub struct Navigator {
    state: NavState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    pub fn new() -> Self {
        Self {
            state: NavState::ListingBooks,
        }
    }

    /// Resume at `last_read` when it still points at a real chapter, otherwise start
    /// at the book list.
    pub fn restore(catalog: &Catalog, last_read: Option<&LastRead>) -> Self {
        let mut nav = Self::new();
        if let Some(last) = last_read {
            match nav.open(catalog, &last.book_id, last.chapter) {
                Ok(()) => tracing::debug!(book = %last.book_id, chapter = last.chapter, "restored reading position"),
                Err(e) => tracing::debug!(error = %e, "ignoring stale reading position"),
            }
        }
        nav
    }

    pub fn state(&self) -> &NavState {
        &self.state
    }

    /// The chapter being read, if any.
    pub fn position(&self) -> Option<(&str, usize)> {
        match &self.state {
            NavState::ReadingChapter { book_id, chapter } => Some((book_id.as_str(), *chapter)),
            _ => None,
        }
    }

    pub fn select_book(&mut self, catalog: &Catalog, book_id: &str) -> Result<bool> {
        if !matches!(self.state, NavState::ListingBooks) {
            return Ok(false);
        }
        let book = catalog
            .find(book_id)
            .ok_or_else(|| SelahError::BookNotFound(book_id.to_string()))?;
        self.state = NavState::ListingChapters {
            book_id: book.id.clone(),
        };
        Ok(true)
    }

    pub fn select_chapter(&mut self, catalog: &Catalog, chapter: usize) -> Result<bool> {
        let book_id = match &self.state {
            NavState::ListingChapters { book_id } => book_id.clone(),
            _ => return Ok(false),
        };
        self.open(catalog, &book_id, chapter)?;
        Ok(true)
    }

    /// Jump straight to a chapter from any state.
    pub fn open(&mut self, catalog: &Catalog, book_id: &str, chapter: usize) -> Result<()> {
        let book = catalog
            .find(book_id)
            .ok_or_else(|| SelahError::chapter_not_found(book_id, chapter))?;
        if !book.has_chapter(chapter) {
            return Err(SelahError::chapter_not_found(book_id, chapter));
        }
        self.state = NavState::ReadingChapter {
            book_id: book.id.clone(),
            chapter,
        };
        Ok(())
    }

    pub fn back(&mut self) -> bool {
        let next = match &self.state {
            NavState::ReadingChapter { book_id, .. } => NavState::ListingChapters {
                book_id: book_id.clone(),
            },
            NavState::ListingChapters { .. } => NavState::ListingBooks,
            _ => return false,
        };
        self.state = next;
        true
    }

    pub fn can_next(&self, catalog: &Catalog) -> bool {
        self.position()
            .and_then(|(book_id, chapter)| {
                catalog.find(book_id).map(|b| b.has_chapter(chapter + 1))
            })
            .unwrap_or(false)
    }

    pub fn can_prev(&self) -> bool {
        self.position().is_some_and(|(_, chapter)| chapter > 1)
    }

    pub fn next(&mut self, catalog: &Catalog) -> bool {
        if !self.can_next(catalog) {
            return false;
        }
        self.step(1)
    }

    pub fn prev(&mut self) -> bool {
        if !self.can_prev() {
            return false;
        }
        self.step(-1)
    }

    fn step(&mut self, delta: isize) -> bool {
        if let NavState::ReadingChapter { chapter, .. } = &mut self.state {
            if let Some(moved) = chapter.checked_add_signed(delta) {
                *chapter = moved;
                return true;
            }
        }
        false
    }

    /// Enter search with an empty query, from any state.
    pub fn activate_search(&mut self) {
        self.state = NavState::Searching {
            query: String::new(),
            results: Vec::new(),
        };
    }

    pub fn deactivate_search(&mut self) -> bool {
        if !matches!(self.state, NavState::Searching { .. }) {
            return false;
        }
        self.state = NavState::ListingBooks;
        true
    }

    /// Record the results of a query. Ignored unless searching.
    pub fn show_results(&mut self, query: &str, found: Vec<SearchResult>) -> bool {
        match &mut self.state {
            NavState::Searching { query: q, results } => {
                *q = query.to_string();
                *results = found;
                true
            }
            _ => false,
        }
    }

    /// Open the chapter of the `index`-th search result.
    ///
    /// Returns the result that was followed, or `None` when not searching.
    pub fn select_result(&mut self, catalog: &Catalog, index: usize) -> Result<Option<SearchResult>> {
        let result = match &self.state {
            NavState::Searching { results, .. } => results
                .get(index)
                .cloned()
                .ok_or_else(|| SelahError::Api(format!("No search result at position {}", index + 1)))?,
            _ => return Ok(None),
        };
        self.open(catalog, &result.book_id, result.chapter)?;
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::genesis_john_corpus;

    fn catalog() -> Catalog {
        Catalog::new(&genesis_john_corpus())
    }

    fn reading(book: &str, chapter: usize) -> NavState {
        NavState::ReadingChapter {
            book_id: book.to_string(),
            chapter,
        }
    }

    #[test]
    fn browse_down_and_back_up() {
        let catalog = catalog();
        let mut nav = Navigator::new();

        assert!(nav.select_book(&catalog, "JHN").unwrap());
        assert_eq!(
            nav.state(),
            &NavState::ListingChapters {
                book_id: "jhn".into()
            }
        );
        assert!(nav.select_chapter(&catalog, 2).unwrap());
        assert_eq!(nav.state(), &reading("jhn", 2));

        assert!(nav.back());
        assert!(matches!(nav.state(), NavState::ListingChapters { .. }));
        assert!(nav.back());
        assert_eq!(nav.state(), &NavState::ListingBooks);
        assert!(!nav.back());
    }

    #[test]
    fn unknown_book_and_chapter_leave_state_alone() {
        let catalog = catalog();
        let mut nav = Navigator::new();
        assert!(matches!(
            nav.select_book(&catalog, "xyz"),
            Err(SelahError::BookNotFound(_))
        ));
        assert_eq!(nav.state(), &NavState::ListingBooks);

        nav.select_book(&catalog, "jhn").unwrap();
        assert!(matches!(
            nav.select_chapter(&catalog, 4),
            Err(SelahError::ChapterNotFound { .. })
        ));
        assert!(matches!(nav.state(), NavState::ListingChapters { .. }));
    }

    #[test]
    fn transitions_from_the_wrong_state_are_no_ops() {
        let catalog = catalog();
        let mut nav = Navigator::new();
        assert!(!nav.select_chapter(&catalog, 1).unwrap());
        assert!(!nav.deactivate_search());
        assert!(!nav.show_results("x", Vec::new()));
        assert_eq!(nav.select_result(&catalog, 0).unwrap(), None);
        assert_eq!(nav.state(), &NavState::ListingBooks);
    }

    #[test]
    fn chapter_stepping_stops_at_the_edges() {
        let catalog = catalog();
        let mut nav = Navigator::new();
        nav.open(&catalog, "jhn", 1).unwrap();

        assert!(!nav.can_prev());
        assert!(!nav.prev());
        assert_eq!(nav.state(), &reading("jhn", 1));

        assert!(nav.next(&catalog));
        assert!(nav.next(&catalog));
        assert_eq!(nav.state(), &reading("jhn", 3));
        assert!(!nav.can_next(&catalog));
        assert!(!nav.next(&catalog));
        assert_eq!(nav.state(), &reading("jhn", 3));

        assert!(nav.prev());
        assert_eq!(nav.state(), &reading("jhn", 2));
    }

    #[test]
    fn single_chapter_book_has_both_directions_disabled() {
        let catalog = catalog();
        let mut nav = Navigator::new();
        nav.open(&catalog, "gn", 1).unwrap();
        assert!(!nav.can_next(&catalog));
        assert!(!nav.can_prev());
    }

    #[test]
    fn search_always_exits_to_book_list() {
        let catalog = catalog();
        let mut nav = Navigator::new();
        nav.open(&catalog, "jhn", 3).unwrap();

        nav.activate_search();
        assert_eq!(
            nav.state(),
            &NavState::Searching {
                query: String::new(),
                results: Vec::new()
            }
        );
        assert!(nav.deactivate_search());
        assert_eq!(nav.state(), &NavState::ListingBooks);
    }

    #[test]
    fn selecting_a_result_opens_its_chapter() {
        let catalog = catalog();
        let corpus = genesis_john_corpus();
        let mut nav = Navigator::new();
        nav.activate_search();
        let results = crate::search::search("light", &corpus);
        assert!(nav.show_results("light", results));

        let followed = nav.select_result(&catalog, 1).unwrap().unwrap();
        assert_eq!(followed.id, "jhn-3-19");
        assert_eq!(nav.state(), &reading("jhn", 3));
    }

    #[test]
    fn selecting_a_missing_result_is_an_error() {
        let catalog = catalog();
        let mut nav = Navigator::new();
        nav.activate_search();
        assert!(nav.select_result(&catalog, 0).is_err());
        assert!(matches!(nav.state(), NavState::Searching { .. }));
    }

    #[test]
    fn restore_uses_valid_last_read_only() {
        let catalog = catalog();
        let valid = LastRead {
            book_id: "jhn".into(),
            chapter: 2,
        };
        assert_eq!(
            Navigator::restore(&catalog, Some(&valid)).state(),
            &reading("jhn", 2)
        );

        let stale = LastRead {
            book_id: "jhn".into(),
            chapter: 40,
        };
        assert_eq!(
            Navigator::restore(&catalog, Some(&stale)).state(),
            &NavState::ListingBooks
        );
        assert_eq!(
            Navigator::restore(&catalog, None).state(),
            &NavState::ListingBooks
        );
    }
}
