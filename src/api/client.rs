//! HTTP implementation of [`ScriptureSource`] on top of `reqwest`.
//!
//! All endpoints live under `{base_url}/api`. Path parameters are pushed as
//! URL segments so book names like "1 John" are percent-encoded.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;
use serde::de::DeserializeOwned;

use super::source::{ApiError, FetchResult, ScriptureSource};
use super::types::{Book, CrossReferences, SearchQuery, SearchResults, Verse};

pub struct HttpScriptureClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpScriptureClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Failed to build HTTP client with timeout ({e}), using defaults");
                reqwest::Client::new()
            });
        Self {
            base_url: base_url.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Builds `{base_url}/api/{segments...}`.
    fn endpoint(&self, segments: &[&str]) -> FetchResult<Url> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ApiError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> FetchResult<T> {
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(url.clone())
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("GET {} failed: {} - {}", url, status, body);
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body,
            });
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_decode() {
                warn!("GET {} returned unparseable body: {}", url, e);
                ApiError::Parse(e.to_string())
            } else {
                ApiError::Network(e.to_string())
            }
        })
    }
}

#[async_trait]
impl ScriptureSource for HttpScriptureClient {
    fn name(&self) -> &str {
        "http"
    }

    async fn books(&self) -> FetchResult<Vec<Book>> {
        let url = self.endpoint(&["books"])?;
        let books: Vec<Book> = self.get_json(url, &[]).await?;
        info!("Fetched {} books", books.len());
        Ok(books)
    }

    async fn daily_verse(&self) -> FetchResult<Verse> {
        let url = self.endpoint(&["daily-verse"])?;
        self.get_json(url, &[]).await
    }

    async fn chapter(&self, book: &str, chapter: u32) -> FetchResult<Vec<Verse>> {
        let chapter = chapter.to_string();
        let url = self.endpoint(&["books", book, "chapters", &chapter])?;
        let verses: Vec<Verse> = self.get_json(url, &[]).await?;
        info!("Fetched {} {}: {} verses", book, chapter, verses.len());
        Ok(verses)
    }

    async fn search(&self, query: &SearchQuery) -> FetchResult<SearchResults> {
        let url = self.endpoint(&["search"])?;
        let mut params = vec![
            ("q", query.query.clone()),
            ("language", query.language.code().to_string()),
            ("limit", query.limit.to_string()),
        ];
        if let Some(testament) = query.scope.testament_param() {
            params.push(("testament", testament.to_string()));
        }
        let results: SearchResults = self.get_json(url, &params).await?;
        info!(
            "Search {:?} ({}) returned {} verses",
            query.query,
            query.language,
            results.verses.len()
        );
        Ok(results)
    }

    async fn cross_references(&self, verse_id: &str) -> FetchResult<CrossReferences> {
        let url = self.endpoint(&["cross-references", verse_id])?;
        self.get_json(url, &[]).await
    }
}
