use crate::model::{Chapter, Verse};

pub const DEFAULT_ATTRIBUTION: &str = "Shared from Selah";

/// Text handed to the platform share sheet for a single verse.
pub fn compose_share_text(verse: &Verse, chapter: &Chapter) -> String {
    compose_share_text_with(verse, chapter, DEFAULT_ATTRIBUTION)
}

pub fn compose_share_text_with(verse: &Verse, chapter: &Chapter, attribution: &str) -> String {
    format!(
        "{} {}:{}\n\n\"{}\"\n\n{}",
        chapter.book_name, chapter.chapter, verse.verse_number, verse.text, attribution
    )
}
