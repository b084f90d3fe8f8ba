pub mod client;
pub mod source;
pub mod types;

pub use client::HttpScriptureClient;
pub use source::{ApiError, FetchResult, ScriptureSource};
pub use types::{
    Book, CrossReferences, Language, LanguageDescriptor, LocalizedText, Notes, SearchQuery,
    SearchResults, SearchScope, Testament, TextDirection, Typography, Verse,
};
