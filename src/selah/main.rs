use clap::Parser;
use colored::*;
use directories::ProjectDirs;
use selah::api::BibleApi;
use selah::config::{SelahConfig, CONFIG_KEYS};
use selah::corpus::{Corpus, VerseSource};
use selah::error::{Result, SelahError};
use selah::model::{Chapter, SearchResult, Verse};
use selah::navigation::NavState;
use selah::store::fs::FileStore;
use std::path::{Path, PathBuf};

mod args;
mod logging;
use args::{Cli, Commands, FontAction};
use logging::{init_logging, stderr_supports_ansi, LogConfig};

const HOME_ENV: &str = "SELAH_HOME";

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&LogConfig::from_verbosity(cli.verbose).with_ansi(stderr_supports_ansi()));
    let data_dir = data_dir()?;

    // Settings are handled before the corpus loads, so a bad corpus path can be fixed.
    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, key.as_deref(), value.as_deref());
    }

    let mut api = init_api(&cli, data_dir)?;

    match cli.command {
        Some(Commands::Books) => handle_books(&api),
        Some(Commands::Chapters { book }) => handle_chapters(&mut api, &book),
        Some(Commands::Read { book, chapter }) => handle_read(&mut api, book, chapter),
        Some(Commands::Next) => handle_step(&mut api, true),
        Some(Commands::Prev) => handle_step(&mut api, false),
        Some(Commands::Search { terms }) => handle_search(&mut api, &terms.join(" ")),
        Some(Commands::Highlight { verse_id }) => {
            let on = api.toggle_highlight(&verse_id)?;
            print_toggle("Highlighted", "Removed highlight from", &verse_id, on);
            Ok(())
        }
        Some(Commands::Bookmark { verse_id }) => {
            let on = api.toggle_bookmark(&verse_id)?;
            print_toggle("Bookmarked", "Removed bookmark from", &verse_id, on);
            Ok(())
        }
        Some(Commands::Note { verse_id, text }) => handle_note(&mut api, &verse_id, &text.join(" ")),
        Some(Commands::Share { verse_id }) => {
            println!("{}", api.share_verse(&verse_id)?);
            Ok(())
        }
        Some(Commands::Font { action }) => handle_font(&mut api, action),
        Some(Commands::Marks) => handle_marks(&api),
        // Handled before the session opened.
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_read(&mut api, None, None),
    }
}

fn data_dir() -> Result<PathBuf> {
    if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("org", "selah", "selah")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| {
            SelahError::Api(format!(
                "Could not determine a data directory; set {}",
                HOME_ENV
            ))
        })
}

fn init_api(cli: &Cli, data_dir: PathBuf) -> Result<BibleApi<FileStore>> {
    let config = SelahConfig::load(&data_dir)?;

    let corpus = match cli.corpus.as_ref().or(config.corpus_path.as_ref()) {
        Some(path) => Corpus::from_path(path)?,
        None => Corpus::bundled()?,
    };
    tracing::info!(
        data_dir = %data_dir.display(),
        books = corpus.books().len(),
        verses = corpus.verse_count(),
        "session started"
    );

    Ok(BibleApi::new(corpus, FileStore::new(data_dir), config))
}

fn handle_config(data_dir: &Path, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = SelahConfig::load(data_dir)?;
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key).unwrap_or_default());
            }
        }
        (Some(key), None) => {
            let shown = config
                .get(key)
                .ok_or_else(|| SelahError::Api(format!("Unknown config key: {}", key)))?;
            println!("{}", shown);
        }
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(data_dir)?;
            let shown = config.get(key).unwrap_or_default();
            println!("{}", format!("{} set to {}", key, shown).green());
        }
    }
    Ok(())
}

fn handle_books(api: &BibleApi<FileStore>) -> Result<()> {
    for group in api.book_groups() {
        println!(
            "{} {}",
            group.category.bold(),
            format!("({})", group.testament).dimmed()
        );
        for book in &group.books {
            println!(
                "  {:<6} {:<20} {}",
                book.id.cyan(),
                book.name,
                format!("{} ch", book.chapter_count).dimmed()
            );
        }
    }
    Ok(())
}

fn handle_chapters(api: &mut BibleApi<FileStore>, book_id: &str) -> Result<()> {
    // A resumed session starts in the reading view; climb to the book list first.
    api.deactivate_search();
    while api.back() {}
    api.select_book(book_id)?;

    let book_id = match api.state() {
        NavState::ListingChapters { book_id } => book_id.clone(),
        _ => return Err(SelahError::BookNotFound(book_id.to_string())),
    };
    let book = api
        .book(&book_id)
        .ok_or_else(|| SelahError::BookNotFound(book_id.clone()))?;

    println!("{}", book.name.bold());
    let chapters: Vec<String> = (1..=book.chapter_count).map(|c| c.to_string()).collect();
    println!("  {}", chapters.join("  "));
    Ok(())
}

fn handle_read(
    api: &mut BibleApi<FileStore>,
    book: Option<String>,
    chapter: Option<usize>,
) -> Result<()> {
    if let (Some(book), Some(chapter)) = (book, chapter) {
        api.open_chapter(&book, chapter)?;
    }
    match api.current_chapter() {
        Some(chapter) => {
            print_chapter(chapter);
            print_step_hints(api);
            Ok(())
        }
        None => {
            println!("{}", "Nothing to resume. Pick a book:".dimmed());
            handle_books(api)
        }
    }
}

fn handle_step(api: &mut BibleApi<FileStore>, forward: bool) -> Result<()> {
    if api.current_chapter().is_none() {
        return Err(SelahError::Api(
            "Not reading a chapter; use `selah read <book> <chapter>` first".to_string(),
        ));
    }

    let moved = if forward {
        api.next_chapter()?.is_some()
    } else {
        api.previous_chapter()?.is_some()
    };
    if !moved {
        let edge = if forward { "last" } else { "first" };
        println!("{}", format!("Already at the {} chapter.", edge).dimmed());
        return Ok(());
    }

    if let Some(chapter) = api.current_chapter() {
        print_chapter(chapter);
    }
    print_step_hints(api);
    Ok(())
}

fn handle_search(api: &mut BibleApi<FileStore>, query: &str) -> Result<()> {
    let outcome = api.search(query);
    if outcome.results.is_empty() {
        println!("{}", "No verses found.".dimmed());
        return Ok(());
    }
    for result in &outcome.results {
        print_search_result(result);
    }
    if outcome.truncated {
        println!(
            "{}",
            format!("Showing the first {} matches.", outcome.results.len()).dimmed()
        );
    }
    Ok(())
}

fn handle_note(api: &mut BibleApi<FileStore>, verse_id: &str, text: &str) -> Result<()> {
    api.set_note(verse_id, text)?;
    if text.trim().is_empty() {
        println!("Removed note from {}", verse_id);
    } else {
        println!("Saved note on {}", verse_id);
    }
    Ok(())
}

fn handle_font(api: &mut BibleApi<FileStore>, action: FontAction) -> Result<()> {
    let size = match action {
        FontAction::Up => api.increase_font_size(),
        FontAction::Down => api.decrease_font_size(),
        FontAction::Reset => api.reset_font_size(),
    };
    println!("Font size: {:.1}", size);
    Ok(())
}

fn handle_marks(api: &BibleApi<FileStore>) -> Result<()> {
    let verses = api.annotated_verses();
    if verses.is_empty() {
        println!("{}", "No highlights, bookmarks or notes yet.".dimmed());
        return Ok(());
    }
    for verse in &verses {
        println!("{}", verse.id.cyan());
        print_verse(verse);
    }
    Ok(())
}

fn print_toggle(on_label: &str, off_label: &str, verse_id: &str, on: bool) {
    if on {
        println!("{} {}", on_label, verse_id);
    } else {
        println!("{} {}", off_label, verse_id);
    }
}

fn print_chapter(chapter: &Chapter) {
    println!("{} {}", chapter.book_name.bold(), chapter.chapter.to_string().bold());
    println!();
    for verse in &chapter.verses {
        print_verse(verse);
    }
}

fn print_verse(verse: &Verse) {
    let marker = if verse.is_bookmarked { "*" } else { " " };
    let number = format!("{:>3}", verse.verse_number).dimmed();
    let text = if verse.is_highlighted {
        verse.text.on_yellow().black()
    } else {
        verse.text.normal()
    };
    println!("{}{} {}", marker.magenta(), number, text);
    if let Some(note) = &verse.note {
        println!("     {}", format!("note: {}", note).dimmed().italic());
    }
}

fn print_search_result(result: &SearchResult) {
    let reference = format!("{} {}:{}", result.book_name, result.chapter, result.verse);
    println!("{:<10} {}", result.id.cyan(), reference.bold());
    println!("           {}", result.text);
}

fn print_step_hints(api: &BibleApi<FileStore>) {
    let mut hints = Vec::new();
    if api.can_go_previous() {
        hints.push("selah prev");
    }
    if api.can_go_next() {
        hints.push("selah next");
    }
    if !hints.is_empty() {
        println!();
        println!("{}", hints.join("  |  ").dimmed());
    }
}
