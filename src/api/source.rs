use std::fmt;

use async_trait::async_trait;

use super::types::{Book, CrossReferences, SearchQuery, SearchResults, Verse};

/// Errors that can occur while fetching content.
///
/// The reader treats every variant the same way ("request failed"); the
/// variants exist so the log says what actually went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Base URL could not be turned into a request URL.
    InvalidUrl(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Server answered with a non-success status.
    Status { status: u16, message: String },
    /// Body was not the expected JSON shape.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::InvalidUrl(msg) => write!(f, "invalid URL: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Status { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

pub type FetchResult<T> = Result<T, ApiError>;

/// Read-only access to the scripture content service.
#[async_trait]
pub trait ScriptureSource: Send + Sync {
    fn name(&self) -> &str;

    /// `GET /books`
    async fn books(&self) -> FetchResult<Vec<Book>>;

    /// `GET /daily-verse`
    async fn daily_verse(&self) -> FetchResult<Verse>;

    /// `GET /books/{book}/chapters/{chapter}`, with `book` the English name.
    async fn chapter(&self, book: &str, chapter: u32) -> FetchResult<Vec<Verse>>;

    /// `GET /search`
    async fn search(&self, query: &SearchQuery) -> FetchResult<SearchResults>;

    /// `GET /cross-references/{verse_id}`
    async fn cross_references(&self, verse_id: &str) -> FetchResult<CrossReferences>;
}
