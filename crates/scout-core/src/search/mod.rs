//! Web search and page scraping.
//!
//! [`SearchProvider`] is the raw, fallible provider contract;
//! [`SearchService`] layers the soft-failure policy the pipeline relies on.

mod error;
mod firecrawl;
mod service;

pub use error::SearchError;
pub use firecrawl::FirecrawlClient;
pub use service::SearchService;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Content formats a provider can return for a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrapeFormat {
    Markdown,
    Html,
    Links,
}

/// Options for a search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Formats to scrape for every hit. Empty means metadata only.
    pub scrape_formats: Vec<ScrapeFormat>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            scrape_formats: vec![ScrapeFormat::Markdown],
        }
    }
}

/// Page metadata reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, rename = "sourceURL", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    #[serde(default, rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
}

/// A single search hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PageMetadata>,
}

impl SearchResult {
    /// Title of the hit, preferring the scraped page's own title.
    pub fn display_title(&self) -> Option<&str> {
        let non_blank = |t: &&str| !t.trim().is_empty();
        self.metadata
            .as_ref()
            .and_then(|m| m.title.as_deref())
            .filter(non_blank)
            .or(self.title.as_deref().filter(non_blank))
    }

    /// Short summary of the hit, preferring the search snippet.
    pub fn summary(&self) -> Option<&str> {
        self.description
            .as_deref()
            .or_else(|| self.metadata.as_ref().and_then(|m| m.description.as_deref()))
            .filter(|d| !d.trim().is_empty())
    }
}

/// Ordered search hits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSet {
    #[serde(default)]
    pub data: Vec<SearchResult>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }
}

/// A scraped page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScrapedPage {
    #[serde(default)]
    pub markdown: Option<String>,
    #[serde(default)]
    pub metadata: Option<PageMetadata>,
}

impl ScrapedPage {
    /// Markdown content, if the page produced any.
    pub fn content(&self) -> Option<&str> {
        self.markdown.as_deref().filter(|m| !m.trim().is_empty())
    }
}

/// Trait for search-and-scrape providers.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Searches the web, optionally scraping each hit.
    async fn search(
        &self,
        query: &str,
        limit: usize,
        options: &SearchOptions,
    ) -> Result<SearchResultSet, SearchError>;

    /// Scrapes a single URL. `Ok(None)` means the provider returned no page.
    async fn scrape(
        &self,
        url: &str,
        formats: &[ScrapeFormat],
    ) -> Result<Option<ScrapedPage>, SearchError>;
}

/// Blanket implementation for boxed trait objects.
#[async_trait]
impl SearchProvider for Box<dyn SearchProvider> {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        options: &SearchOptions,
    ) -> Result<SearchResultSet, SearchError> {
        (**self).search(query, limit, options).await
    }

    async fn scrape(
        &self,
        url: &str,
        formats: &[ScrapeFormat],
    ) -> Result<Option<ScrapedPage>, SearchError> {
        (**self).scrape(url, formats).await
    }
}
