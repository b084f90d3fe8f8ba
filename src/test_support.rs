//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::api::{
    ApiError, Book, CrossReferences, FetchResult, Language, LocalizedText, Notes,
    ScriptureSource, SearchQuery, SearchResults, Testament, Verse,
};
use crate::core::action::{Action, Effect, update};
use crate::core::state::App;

/// A request seen by [`StubSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedRequest {
    Books,
    DailyVerse,
    Chapter(String, u32),
    Search(String, Language, u32),
    CrossReferences(String),
}

/// In-memory source that answers from canned data and records every request.
#[derive(Clone)]
pub struct StubSource {
    fail: bool,
    search: SearchResults,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl StubSource {
    pub fn sample() -> Self {
        Self {
            fail: false,
            search: SearchResults {
                verses: vec![sample_verse("v1", "John", 3, 16)],
                total_count: Some(1),
            },
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Every request fails with a network error.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::sample()
        }
    }

    pub fn with_search(mut self, search: SearchResults) -> Self {
        self.search = search;
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record<T>(&self, request: RecordedRequest, value: impl FnOnce() -> T) -> FetchResult<T> {
        self.requests.lock().unwrap().push(request);
        if self.fail {
            Err(ApiError::Network("stub failure".into()))
        } else {
            Ok(value())
        }
    }
}

#[async_trait]
impl ScriptureSource for StubSource {
    fn name(&self) -> &str {
        "stub"
    }

    async fn books(&self) -> FetchResult<Vec<Book>> {
        self.record(RecordedRequest::Books, sample_books)
    }

    async fn daily_verse(&self) -> FetchResult<Verse> {
        self.record(RecordedRequest::DailyVerse, || {
            sample_verse("psa-23-1", "Psalms", 23, 1)
        })
    }

    async fn chapter(&self, book: &str, chapter: u32) -> FetchResult<Vec<Verse>> {
        self.record(RecordedRequest::Chapter(book.to_string(), chapter), || {
            vec![
                sample_verse("gen-1-1", "Genesis", 1, 1),
                sample_verse("gen-1-2", "Genesis", 1, 2),
            ]
        })
    }

    async fn search(&self, query: &SearchQuery) -> FetchResult<SearchResults> {
        self.record(
            RecordedRequest::Search(query.query.clone(), query.language, query.limit),
            || self.search.clone(),
        )
    }

    async fn cross_references(&self, verse_id: &str) -> FetchResult<CrossReferences> {
        self.record(RecordedRequest::CrossReferences(verse_id.to_string()), || {
            CrossReferences {
                original_verse: None,
                cross_references: vec![sample_verse("joh-1-1", "John", 1, 1)],
            }
        })
    }
}

pub fn sample_books() -> Vec<Book> {
    vec![
        Book {
            id: "gen".into(),
            name: LocalizedText::from([
                (Language::English, "Genesis"),
                (Language::Hindi, "उत्पत्ति"),
                (Language::Hebrew, "בְּרֵאשִׁית"),
                (Language::Greek, "Γένεσις"),
            ]),
            testament: Some(Testament::Old),
            chapters: 50,
        },
        Book {
            id: "joh".into(),
            name: LocalizedText::from([(Language::English, "John")]),
            testament: Some(Testament::New),
            chapters: 21,
        },
    ]
}

/// A verse with English text, Hebrew/Greek text and transliteration, and notes.
pub fn sample_verse(id: &str, book: &str, chapter: u32, verse: u32) -> Verse {
    Verse {
        id: id.into(),
        book: book.into(),
        chapter,
        verse,
        text: LocalizedText::from([
            (Language::English, "In the beginning God created the heavens and the earth."),
            (Language::Hebrew, "בְּרֵאשִׁית בָּרָא אֱלֹהִים"),
            (Language::Greek, "Ἐν ἀρχῇ ἐποίησεν ὁ θεὸς"),
        ]),
        transliteration: LocalizedText::from([
            (Language::Hebrew, "B'reishit bara Elohim"),
            (Language::Greek, "En archē epoiēsen ho theos"),
        ]),
        notes: Some(Notes {
            commentary: Some("God as the Creator of all things.".into()),
            study_notes: None,
        }),
        cross_references: vec!["John 1:1".into()],
    }
}

/// Creates a test App backed by the sample stub source.
pub fn test_app() -> App {
    test_app_with(StubSource::sample())
}

pub fn test_app_with(source: StubSource) -> App {
    App::new(Arc::new(source), Language::English)
}

/// Runs `action` through `update()` and performs every resulting fetch
/// (and the fetches those trigger) until nothing is left to do.
pub async fn drive(app: &mut App, action: Action) {
    let mut queue = VecDeque::from([action]);
    while let Some(action) = queue.pop_front() {
        if let Effect::Fetch(fetches) = update(app, action) {
            let source = app.source.clone();
            for fetch in fetches {
                queue.push_back(fetch.perform(source.as_ref()).await);
            }
        }
    }
}
