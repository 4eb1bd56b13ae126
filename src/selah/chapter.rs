use crate::annotations::AnnotationState;
use crate::corpus::VerseSource;
use crate::error::{Result, SelahError};
use crate::model::{Chapter, Verse, VerseId};

/// Build the display-ready verse list for one chapter.
///
/// Every verse is decorated from `annotations` as it stands right now. The result is a
/// snapshot: callers rebuild it after any annotation change that touches the chapter.
pub fn materialize<V: VerseSource + ?Sized>(
    book_id: &str,
    chapter: usize,
    source: &V,
    annotations: &AnnotationState,
) -> Result<Chapter> {
    let book = source
        .find_book(book_id)
        .ok_or_else(|| SelahError::chapter_not_found(book_id, chapter))?;
    let texts = chapter
        .checked_sub(1)
        .and_then(|idx| book.chapters.get(idx))
        .ok_or_else(|| SelahError::chapter_not_found(book_id, chapter))?;

    let id = book.id();
    let verses = texts
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            let verse_id = VerseId::new(id.as_str(), chapter, idx + 1).to_string();
            Verse {
                is_highlighted: annotations.is_highlighted(&verse_id),
                is_bookmarked: annotations.is_bookmarked(&verse_id),
                note: annotations.note(&verse_id).map(str::to_string),
                verse_number: idx + 1,
                text: text.clone(),
                id: verse_id,
            }
        })
        .collect();

    Ok(Chapter {
        book_id: id,
        book_name: book.name.clone(),
        chapter,
        verses,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::john_corpus;

    #[test]
    fn materializes_undecorated_chapter() {
        let corpus = john_corpus();
        let chapter = materialize("jhn", 1, &corpus, &AnnotationState::default()).unwrap();

        assert_eq!(chapter.book_id, "jhn");
        assert_eq!(chapter.book_name, "John");
        assert_eq!(chapter.chapter, 1);
        assert_eq!(chapter.verses.len(), 3);

        let first = &chapter.verses[0];
        assert_eq!(first.id, "jhn-1-1");
        assert_eq!(first.verse_number, 1);
        assert_eq!(first.text, "In the beginning...");
        assert!(!first.is_highlighted);
        assert!(!first.is_bookmarked);
        assert_eq!(first.note, None);

        let numbers: Vec<_> = chapter.verses.iter().map(|v| v.verse_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
    }

    #[test]
    fn decorates_from_annotation_state() {
        let corpus = john_corpus();
        let mut state = AnnotationState::default();
        state.highlights.insert("jhn-1-2".into());
        state.bookmarks.insert("jhn-1-1".into());
        state.notes.insert("jhn-1-3".into(), "remember".into());

        let chapter = materialize("jhn", 1, &corpus, &state).unwrap();
        for verse in &chapter.verses {
            assert_eq!(verse.is_highlighted, state.highlights.contains(&verse.id));
            assert_eq!(verse.is_bookmarked, state.bookmarks.contains(&verse.id));
            assert_eq!(verse.note.as_deref(), state.note(&verse.id));
        }
        assert_eq!(chapter.verses[2].note.as_deref(), Some("remember"));
    }

    #[test]
    fn book_lookup_ignores_case() {
        let corpus = john_corpus();
        let chapter = materialize("JHN", 1, &corpus, &AnnotationState::default()).unwrap();
        assert_eq!(chapter.verses[0].id, "jhn-1-1");
    }

    #[test]
    fn unknown_book_or_chapter_is_chapter_not_found() {
        let corpus = john_corpus();
        let state = AnnotationState::default();
        for (book, chapter) in [("xyz", 1), ("jhn", 0), ("jhn", 2)] {
            let err = materialize(book, chapter, &corpus, &state).unwrap_err();
            assert!(
                matches!(err, SelahError::ChapterNotFound { .. }),
                "{} {} should be missing",
                book,
                chapter
            );
        }
    }
}
