//! # Fetches
//!
//! A `Fetch` is a request the reducer wants made. The adapter runs it with
//! [`Fetch::perform`] and feeds the resulting `Action` back into `update()`.
//!
//! ```text
//! update() ──Effect::Fetch──▶ perform(source) ──Action──▶ update()
//! ```
//!
//! Each operation also declares what happens to already displayed data when
//! it fails, so the reducer never decides that ad hoc.

use log::debug;

use crate::api::{ScriptureSource, SearchQuery};
use crate::core::action::Action;

/// Every kind of request the reader makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Books,
    DailyVerse,
    Chapter,
    Search,
    CrossReferences,
}

/// What a failed request does to the data it would have replaced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Keep whatever is displayed.
    PreserveStale,
    /// Empty the display.
    Clear,
}

impl Operation {
    pub fn failure_policy(self) -> FailurePolicy {
        match self {
            Operation::Search => FailurePolicy::Clear,
            Operation::Books
            | Operation::DailyVerse
            | Operation::Chapter
            | Operation::CrossReferences => FailurePolicy::PreserveStale,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Books => "books",
            Operation::DailyVerse => "daily verse",
            Operation::Chapter => "chapter",
            Operation::Search => "search",
            Operation::CrossReferences => "cross references",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetch {
    Books,
    DailyVerse,
    Chapter {
        book: String,
        chapter: u32,
        generation: u64,
    },
    Search {
        query: SearchQuery,
        generation: u64,
    },
    CrossReferences {
        verse_id: String,
    },
}

impl Fetch {
    pub fn operation(&self) -> Operation {
        match self {
            Fetch::Books => Operation::Books,
            Fetch::DailyVerse => Operation::DailyVerse,
            Fetch::Chapter { .. } => Operation::Chapter,
            Fetch::Search { .. } => Operation::Search,
            Fetch::CrossReferences { .. } => Operation::CrossReferences,
        }
    }

    /// Runs the request and wraps the outcome in the matching completion action.
    pub async fn perform(self, source: &dyn ScriptureSource) -> Action {
        debug!("Performing {:?} via {}", self, source.name());
        match self {
            Fetch::Books => Action::BooksLoaded(source.books().await),
            Fetch::DailyVerse => Action::DailyVerseLoaded(source.daily_verse().await),
            Fetch::Chapter {
                book,
                chapter,
                generation,
            } => Action::ChapterLoaded {
                generation,
                result: source.chapter(&book, chapter).await,
            },
            Fetch::Search { query, generation } => Action::SearchCompleted {
                generation,
                result: source.search(&query).await,
            },
            Fetch::CrossReferences { verse_id } => {
                let result = source.cross_references(&verse_id).await;
                Action::CrossReferencesLoaded { verse_id, result }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{RecordedRequest, StubSource};

    #[test]
    fn test_only_search_clears_on_failure() {
        assert_eq!(Operation::Search.failure_policy(), FailurePolicy::Clear);
        assert_eq!(Operation::Chapter.failure_policy(), FailurePolicy::PreserveStale);
        assert_eq!(
            Operation::CrossReferences.failure_policy(),
            FailurePolicy::PreserveStale
        );
        assert_eq!(Operation::Books.failure_policy(), FailurePolicy::PreserveStale);
        assert_eq!(Operation::DailyVerse.failure_policy(), FailurePolicy::PreserveStale);
    }

    #[tokio::test]
    async fn test_perform_chapter_carries_generation() {
        let source = StubSource::sample();
        let fetch = Fetch::Chapter {
            book: "Genesis".into(),
            chapter: 1,
            generation: 7,
        };
        match fetch.perform(&source).await {
            Action::ChapterLoaded { generation, result } => {
                assert_eq!(generation, 7);
                assert_eq!(result.unwrap().len(), 2);
            }
            other => panic!("unexpected action: {other:?}"),
        }
        assert_eq!(
            source.requests(),
            vec![RecordedRequest::Chapter("Genesis".into(), 1)]
        );
    }

    #[tokio::test]
    async fn test_perform_cross_references_keeps_verse_id() {
        let source = StubSource::sample();
        let fetch = Fetch::CrossReferences {
            verse_id: "gen-1-1".into(),
        };
        match fetch.perform(&source).await {
            Action::CrossReferencesLoaded { verse_id, result } => {
                assert_eq!(verse_id, "gen-1-1");
                assert_eq!(result.unwrap().cross_references.len(), 1);
            }
            other => panic!("unexpected action: {other:?}"),
        }
    }
}
