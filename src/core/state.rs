//! # Application State
//!
//! Everything the reader knows at a given moment. No TUI-specific types live
//! here; presentation state (scroll offsets, open pickers) is in `tui`.
//!
//! ```text
//! App
//! ├── source: Arc<dyn ScriptureSource>   // content service
//! ├── books / selected_book / selected_chapter
//! ├── verses: Vec<Verse>                 // current chapter
//! ├── active_tab: Tab                    // Read | Search | Daily
//! ├── language: Language
//! ├── search_query / search_scope / search_results / search_total
//! ├── daily_verse: Option<Verse>
//! ├── cross_refs: CrossReferenceState    // visibility + cache, keyed by verse id
//! ├── requests: RequestTracker           // in-flight generations
//! └── status_message: String
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::api::{Book, Language, ScriptureSource, SearchScope, Verse};
use crate::core::config::{DEFAULT_SEARCH_LIMIT, ResolvedConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Read,
    Search,
    Daily,
}

impl Tab {
    pub const ALL: [Tab; 3] = [Tab::Read, Tab::Search, Tab::Daily];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Read => "Read Scripture",
            Tab::Search => "Search",
            Tab::Daily => "Daily Verse",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Read => 0,
            Tab::Search => 1,
            Tab::Daily => 2,
        }
    }

    pub fn next(self) -> Tab {
        Tab::ALL[(self.index() + 1) % Tab::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Tab::ALL[(self.index() + Tab::ALL.len() - 1) % Tab::ALL.len()]
    }
}

/// Cross-reference panels: visibility and fetched data are tracked separately.
///
/// Hiding a panel never drops its data, and data for an id is only fetched
/// until one fetch succeeds.
#[derive(Debug, Default)]
pub struct CrossReferenceState {
    visible: HashSet<String>,
    cache: HashMap<String, Vec<Verse>>,
    pending: HashSet<String>,
}

impl CrossReferenceState {
    pub fn is_visible(&self, verse_id: &str) -> bool {
        self.visible.contains(verse_id)
    }

    pub fn cached(&self, verse_id: &str) -> Option<&[Verse]> {
        self.cache.get(verse_id).map(Vec::as_slice)
    }

    pub fn is_pending(&self, verse_id: &str) -> bool {
        self.pending.contains(verse_id)
    }

    /// Related verses to display: only when the panel is open and data exists.
    pub fn expanded(&self, verse_id: &str) -> Option<&[Verse]> {
        if self.is_visible(verse_id) {
            self.cached(verse_id)
        } else {
            None
        }
    }

    pub(crate) fn flip(&mut self, verse_id: &str) {
        if !self.visible.remove(verse_id) {
            self.visible.insert(verse_id.to_string());
        }
    }

    pub(crate) fn store(&mut self, verse_id: &str, verses: Vec<Verse>) {
        self.cache.insert(verse_id.to_string(), verses);
    }

    /// Returns false if a fetch for this id is already running.
    pub(crate) fn begin_fetch(&mut self, verse_id: &str) -> bool {
        self.pending.insert(verse_id.to_string())
    }

    pub(crate) fn end_fetch(&mut self, verse_id: &str) {
        self.pending.remove(verse_id);
    }
}

/// Generation numbers for chapter and search loads.
///
/// Every issued request gets a fresh number. A completion is applied only if
/// its number is still the current one for its kind; anything older was
/// superseded while in flight.
#[derive(Debug, Default)]
pub struct RequestTracker {
    last_issued: u64,
    chapter: Option<u64>,
    search: Option<u64>,
}

impl RequestTracker {
    fn issue(&mut self) -> u64 {
        self.last_issued += 1;
        self.last_issued
    }

    pub(crate) fn begin_chapter(&mut self) -> u64 {
        let generation = self.issue();
        self.chapter = Some(generation);
        generation
    }

    pub(crate) fn begin_search(&mut self) -> u64 {
        let generation = self.issue();
        self.search = Some(generation);
        generation
    }

    /// True if `generation` is the current chapter request; clears it.
    pub(crate) fn finish_chapter(&mut self, generation: u64) -> bool {
        if self.chapter == Some(generation) {
            self.chapter = None;
            true
        } else {
            false
        }
    }

    /// True if `generation` is the current search request; clears it.
    pub(crate) fn finish_search(&mut self, generation: u64) -> bool {
        if self.search == Some(generation) {
            self.search = None;
            true
        } else {
            false
        }
    }

    pub fn chapter_in_flight(&self) -> bool {
        self.chapter.is_some()
    }

    pub fn search_in_flight(&self) -> bool {
        self.search.is_some()
    }
}

pub struct App {
    pub source: Arc<dyn ScriptureSource>,
    pub books: Vec<Book>,
    pub selected_book: Option<Book>,
    pub selected_chapter: u32,
    pub verses: Vec<Verse>,
    pub active_tab: Tab,
    pub language: Language,
    pub search_query: String,
    pub search_scope: SearchScope,
    pub search_limit: u32,
    pub search_results: Vec<Verse>,
    /// Total matches reported by the server (may exceed `search_limit`).
    pub search_total: Option<u64>,
    pub daily_verse: Option<Verse>,
    pub cross_refs: CrossReferenceState,
    pub requests: RequestTracker,
    pub status_message: String,
}

impl App {
    pub fn new(source: Arc<dyn ScriptureSource>, language: Language) -> Self {
        Self {
            source,
            books: Vec::new(),
            selected_book: None,
            selected_chapter: 1,
            verses: Vec::new(),
            active_tab: Tab::default(),
            language,
            search_query: String::new(),
            search_scope: SearchScope::default(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            search_results: Vec::new(),
            search_total: None,
            daily_verse: None,
            cross_refs: CrossReferenceState::default(),
            requests: RequestTracker::default(),
            status_message: String::from("Welcome to Lectio"),
        }
    }

    pub fn from_config(source: Arc<dyn ScriptureSource>, config: &ResolvedConfig) -> Self {
        let mut app = Self::new(source, config.language);
        app.search_limit = config.search_limit;
        app
    }

    /// True while the current chapter or search request is outstanding.
    pub fn is_loading(&self) -> bool {
        self.requests.chapter_in_flight() || self.requests.search_in_flight()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;

    #[test]
    fn test_app_new_defaults() {
        let app = test_app();
        assert_eq!(app.status_message, "Welcome to Lectio");
        assert!(!app.is_loading());
        assert_eq!(app.selected_chapter, 1);
        assert_eq!(app.active_tab, Tab::Read);
        assert_eq!(app.language, Language::English);
        assert_eq!(app.search_limit, 50);
    }

    #[test]
    fn test_tab_cycles_both_ways() {
        assert_eq!(Tab::Read.next(), Tab::Search);
        assert_eq!(Tab::Daily.next(), Tab::Read);
        assert_eq!(Tab::Read.prev(), Tab::Daily);
    }

    #[test]
    fn test_newer_generation_supersedes_older() {
        let mut tracker = RequestTracker::default();
        let first = tracker.begin_chapter();
        let second = tracker.begin_chapter();
        assert!(!tracker.finish_chapter(first));
        assert!(tracker.chapter_in_flight());
        assert!(tracker.finish_chapter(second));
        assert!(!tracker.chapter_in_flight());
    }

    #[test]
    fn test_chapter_and_search_generations_are_independent() {
        let mut tracker = RequestTracker::default();
        let chapter = tracker.begin_chapter();
        let search = tracker.begin_search();
        assert_ne!(chapter, search);
        assert!(tracker.finish_search(search));
        assert!(tracker.chapter_in_flight());
        assert!(!tracker.finish_search(chapter));
    }

    #[test]
    fn test_hiding_keeps_cached_cross_references() {
        let mut refs = CrossReferenceState::default();
        refs.store("v1", Vec::new());
        refs.flip("v1");
        assert!(refs.expanded("v1").is_some());
        refs.flip("v1");
        assert!(refs.expanded("v1").is_none());
        assert!(refs.cached("v1").is_some());
    }

    #[test]
    fn test_only_one_pending_fetch_per_id() {
        let mut refs = CrossReferenceState::default();
        assert!(refs.begin_fetch("v1"));
        assert!(!refs.begin_fetch("v1"));
        refs.end_fetch("v1");
        assert!(refs.begin_fetch("v1"));
    }
}
