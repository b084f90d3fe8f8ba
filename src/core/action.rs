//! # Actions
//!
//! Everything that can happen in the reader becomes an `Action`.
//! User picks a book? That's `Action::SelectBook(id)`.
//! Server answers? That's `Action::ChapterLoaded { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` saying what I/O to start next.
//! No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Selecting a different (book, chapter) pair always yields a chapter fetch,
//! which is how chapter loading follows the selection without the adapter
//! having to remember to ask for it.

use log::{debug, info, warn};

use crate::api::{ApiError, Book, CrossReferences, FetchResult, Language, SearchQuery, SearchResults, Verse};
use crate::core::fetch::{FailurePolicy, Fetch, Operation};
use crate::core::state::{App, Tab};

#[derive(Debug)]
pub enum Action {
    /// Initial load: books and daily verse, in parallel.
    Start,
    Quit,
    SelectBook(String),
    SelectChapter(u32),
    NextChapter,
    PrevChapter,
    SetLanguage(Language),
    SetTab(Tab),
    /// Run a search for the given query in the current language.
    Search(String),
    CycleSearchScope,
    ToggleCrossReferences(String),
    BooksLoaded(FetchResult<Vec<Book>>),
    DailyVerseLoaded(FetchResult<Verse>),
    ChapterLoaded {
        generation: u64,
        result: FetchResult<Vec<Verse>>,
    },
    SearchCompleted {
        generation: u64,
        result: FetchResult<SearchResults>,
    },
    CrossReferencesLoaded {
        verse_id: String,
        result: FetchResult<CrossReferences>,
    },
}

/// Side effects requested by `update()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Fetch(Vec<Fetch>),
}

impl Effect {
    fn fetch(fetch: Fetch) -> Self {
        Effect::Fetch(vec![fetch])
    }
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Start => {
            info!("Loading books and daily verse");
            Effect::Fetch(vec![Fetch::Books, Fetch::DailyVerse])
        }
        Action::Quit => Effect::Quit,
        Action::SelectBook(id) => {
            let Some(book) = app.books.iter().find(|b| b.id == id).cloned() else {
                warn!("Ignoring selection of unknown book {id}");
                return Effect::None;
            };
            if app.selected_book.as_ref().is_some_and(|b| b.id == book.id) {
                return Effect::None;
            }
            select(app, Some(book), 1)
        }
        Action::SelectChapter(chapter) => {
            let Some(book) = app.selected_book.clone() else {
                return Effect::None;
            };
            if !book.chapter_options().contains(&chapter) {
                warn!(
                    "Ignoring chapter {} outside 1..={} for {}",
                    chapter,
                    book.chapters,
                    book.english_name()
                );
                return Effect::None;
            }
            select(app, Some(book), chapter)
        }
        Action::NextChapter => {
            let last = app.selected_book.as_ref().map_or(0, |b| b.chapters);
            if app.selected_chapter < last {
                update(app, Action::SelectChapter(app.selected_chapter + 1))
            } else {
                Effect::None
            }
        }
        Action::PrevChapter => {
            if app.selected_chapter > 1 {
                update(app, Action::SelectChapter(app.selected_chapter - 1))
            } else {
                Effect::None
            }
        }
        Action::SetLanguage(language) => {
            debug!("Language {} -> {}", app.language, language);
            app.language = language;
            app.status_message = format!("Language: {}", language.descriptor().display_name);
            Effect::None
        }
        Action::SetTab(tab) => {
            app.active_tab = tab;
            Effect::None
        }
        Action::Search(query) => {
            app.search_query = query;
            search(app)
        }
        Action::CycleSearchScope => {
            app.search_scope = app.search_scope.next();
            app.status_message = format!("Search scope: {}", app.search_scope.label());
            Effect::None
        }
        Action::ToggleCrossReferences(verse_id) => toggle_cross_references(app, verse_id),
        Action::BooksLoaded(result) => match result {
            Ok(books) => {
                info!("Loaded {} books", books.len());
                app.books = books;
                match app.books.first().cloned() {
                    Some(first) => select(app, Some(first), 1),
                    None => Effect::None,
                }
            }
            Err(e) => {
                report_failure(Operation::Books, &e);
                Effect::None
            }
        },
        Action::DailyVerseLoaded(result) => {
            match result {
                Ok(verse) => {
                    info!("Daily verse: {}", verse.citation());
                    app.daily_verse = Some(verse);
                }
                Err(e) => report_failure(Operation::DailyVerse, &e),
            }
            Effect::None
        }
        Action::ChapterLoaded { generation, result } => {
            if !app.requests.finish_chapter(generation) {
                debug!("Discarding superseded chapter response (generation {generation})");
                return Effect::None;
            }
            apply_outcome(&mut app.verses, result, Operation::Chapter);
            Effect::None
        }
        Action::SearchCompleted { generation, result } => {
            if !app.requests.finish_search(generation) {
                debug!("Discarding superseded search response (generation {generation})");
                return Effect::None;
            }
            let total = result.as_ref().ok().and_then(|r| r.total_count);
            let result = result.map(|r| r.verses);
            if apply_outcome(&mut app.search_results, result, Operation::Search) {
                app.search_total = total;
                app.active_tab = Tab::Search;
                app.status_message = format!("Found {} results", app.search_results.len());
            } else {
                app.search_total = None;
            }
            Effect::None
        }
        Action::CrossReferencesLoaded { verse_id, result } => {
            app.cross_refs.end_fetch(&verse_id);
            match result {
                Ok(refs) => {
                    debug!(
                        "Cached {} cross references for {}",
                        refs.cross_references.len(),
                        verse_id
                    );
                    app.cross_refs.store(&verse_id, refs.cross_references);
                    app.cross_refs.flip(&verse_id);
                }
                Err(e) => report_failure(Operation::CrossReferences, &e),
            }
            Effect::None
        }
    }
}

/// Applies a new (book, chapter) selection; a changed selection loads the chapter.
fn select(app: &mut App, book: Option<Book>, chapter: u32) -> Effect {
    let same_book = match (&app.selected_book, &book) {
        (Some(current), Some(new)) => current.id == new.id,
        (None, None) => true,
        _ => false,
    };
    if same_book && app.selected_chapter == chapter {
        return Effect::None;
    }
    app.selected_book = book;
    app.selected_chapter = chapter;
    load_chapter(app)
}

fn load_chapter(app: &mut App) -> Effect {
    let Some(book) = &app.selected_book else {
        return Effect::None;
    };
    let book_name = book.english_name().to_string();
    let generation = app.requests.begin_chapter();
    info!(
        "Loading {} {} (generation {})",
        book_name, app.selected_chapter, generation
    );
    Effect::fetch(Fetch::Chapter {
        book: book_name,
        chapter: app.selected_chapter,
        generation,
    })
}

fn search(app: &mut App) -> Effect {
    let query = app.search_query.trim();
    if query.is_empty() {
        return Effect::None;
    }
    let query = SearchQuery {
        query: query.to_string(),
        language: app.language,
        limit: app.search_limit,
        scope: app.search_scope,
    };
    let generation = app.requests.begin_search();
    info!("Searching {:?} (generation {})", query, generation);
    Effect::fetch(Fetch::Search { query, generation })
}

fn toggle_cross_references(app: &mut App, verse_id: String) -> Effect {
    if app.cross_refs.cached(&verse_id).is_some() {
        app.cross_refs.flip(&verse_id);
        return Effect::None;
    }
    if !app.cross_refs.begin_fetch(&verse_id) {
        debug!("Cross references for {verse_id} already loading");
        return Effect::None;
    }
    Effect::fetch(Fetch::CrossReferences { verse_id })
}

/// Replaces `target` on success, or applies the operation's failure policy.
/// Returns whether the request succeeded.
fn apply_outcome<T>(target: &mut Vec<T>, result: FetchResult<Vec<T>>, operation: Operation) -> bool {
    match result {
        Ok(items) => {
            *target = items;
            true
        }
        Err(e) => {
            report_failure(operation, &e);
            if operation.failure_policy() == FailurePolicy::Clear {
                target.clear();
            }
            false
        }
    }
}

fn report_failure(operation: Operation, error: &ApiError) {
    warn!(
        "Error fetching {} ({:?}): {}",
        operation.label(),
        operation.failure_policy(),
        error
    );
}
