use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "selah")]
#[command(about = "Read, search and annotate the Bible from the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Corpus file to read instead of the configured or bundled one
    #[arg(long, global = true, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List books grouped by testament and category
    #[command(alias = "ls")]
    Books,

    /// List the chapters of a book
    Chapters {
        /// Book id (e.g. jhn)
        book: String,
    },

    /// Read a chapter, or resume where you left off
    #[command(alias = "r")]
    Read {
        /// Book id (e.g. jhn)
        #[arg(requires = "chapter")]
        book: Option<String>,

        /// Chapter number
        chapter: Option<usize>,
    },

    /// Read the next chapter
    #[command(alias = "n")]
    Next,

    /// Read the previous chapter
    #[command(alias = "p")]
    Prev,

    /// Search every verse for the given words
    #[command(alias = "s")]
    Search {
        #[arg(required = true, num_args = 1..)]
        terms: Vec<String>,
    },

    /// Toggle the highlight on a verse (e.g. jhn-3-16)
    Highlight { verse_id: String },

    /// Toggle the bookmark on a verse (e.g. jhn-3-16)
    Bookmark { verse_id: String },

    /// Attach a note to a verse; no text removes the note
    Note {
        verse_id: String,

        #[arg(num_args = 0..)]
        text: Vec<String>,
    },

    /// Print a verse formatted for sharing
    Share { verse_id: String },

    /// Adjust the reading font size
    Font {
        #[arg(value_enum)]
        action: FontAction,
    },

    /// List every highlighted, bookmarked or annotated verse
    Marks,

    /// Show or change settings (attribution, search-limit, corpus)
    Config {
        /// Setting to show or change; omit to list all
        key: Option<String>,

        /// New value; `none` clears search-limit or corpus
        value: Option<String>,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontAction {
    Up,
    Down,
    Reset,
}
