//! In-memory doubles for the LLM and search providers.
//!
//! Both record every call so tests can assert on what the pipeline sent.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::{LLMError, LLM};
use crate::search::{
    PageMetadata, ScrapeFormat, ScrapedPage, SearchError, SearchOptions, SearchProvider,
    SearchResult, SearchResultSet,
};

/// A recorded LLM call.
#[derive(Debug, Clone, PartialEq)]
pub struct LlmCall {
    pub system: Option<String>,
    pub prompt: String,
}

/// LLM that replays scripted replies in order.
///
/// Once the script runs out every call fails with `RequestFailed`.
#[derive(Default)]
pub struct ScriptedLLM {
    responses: Mutex<VecDeque<Result<String, LLMError>>>,
    calls: Mutex<Vec<LlmCall>>,
}

impl ScriptedLLM {
    pub fn new(responses: Vec<Result<String, LLMError>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<LlmCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn next(&self, system: Option<&str>, prompt: &str) -> Result<String, LLMError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(LlmCall {
                system: system.map(str::to_string),
                prompt: prompt.to_string(),
            });
        }

        self.responses
            .lock()
            .ok()
            .and_then(|mut r| r.pop_front())
            .unwrap_or_else(|| Err(LLMError::RequestFailed("script exhausted".to_string())))
    }
}

#[async_trait]
impl LLM for ScriptedLLM {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        self.next(None, prompt)
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String, LLMError> {
        self.next(Some(system), prompt)
    }
}

/// A recorded search call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchCall {
    pub query: String,
    pub limit: usize,
}

/// Search provider backed by canned results keyed on exact query / URL.
///
/// Unknown queries return no hits; unknown URLs return no page.
pub struct FakeSearchProvider {
    searches: HashMap<String, Result<Vec<SearchResult>, SearchError>>,
    pages: HashMap<String, Result<ScrapedPage, SearchError>>,
    respect_limit: bool,
    search_calls: Mutex<Vec<SearchCall>>,
    scrape_calls: Mutex<Vec<String>>,
}

impl Default for FakeSearchProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeSearchProvider {
    pub fn new() -> Self {
        Self {
            searches: HashMap::new(),
            pages: HashMap::new(),
            respect_limit: true,
            search_calls: Mutex::new(Vec::new()),
            scrape_calls: Mutex::new(Vec::new()),
        }
    }

    /// Canned hits for `query`.
    pub fn with_search(mut self, query: &str, results: Vec<SearchResult>) -> Self {
        self.searches.insert(query.to_string(), Ok(results));
        self
    }

    /// Makes searches for `query` fail.
    pub fn fail_search(mut self, query: &str, error: SearchError) -> Self {
        self.searches.insert(query.to_string(), Err(error));
        self
    }

    /// Canned markdown for `url`.
    pub fn with_page(mut self, url: &str, markdown: &str) -> Self {
        let page = ScrapedPage {
            markdown: Some(markdown.to_string()),
            metadata: Some(PageMetadata {
                source_url: Some(url.to_string()),
                ..PageMetadata::default()
            }),
        };
        self.pages.insert(url.to_string(), Ok(page));
        self
    }

    /// Makes scrapes of `url` fail.
    pub fn fail_scrape(mut self, url: &str, error: SearchError) -> Self {
        self.pages.insert(url.to_string(), Err(error));
        self
    }

    /// Returns every canned hit regardless of the requested limit.
    pub fn ignoring_limits(mut self) -> Self {
        self.respect_limit = false;
        self
    }

    pub fn search_calls(&self) -> Vec<SearchCall> {
        self.search_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn scrape_calls(&self) -> Vec<String> {
        self.scrape_calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl SearchProvider for FakeSearchProvider {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        _options: &SearchOptions,
    ) -> Result<SearchResultSet, SearchError> {
        if let Ok(mut calls) = self.search_calls.lock() {
            calls.push(SearchCall {
                query: query.to_string(),
                limit,
            });
        }

        match self.searches.get(query) {
            Some(Ok(results)) => {
                let take = if self.respect_limit { limit } else { results.len() };
                Ok(SearchResultSet {
                    data: results.iter().take(take).cloned().collect(),
                })
            }
            Some(Err(e)) => Err(e.clone()),
            None => Ok(SearchResultSet::default()),
        }
    }

    async fn scrape(
        &self,
        url: &str,
        _formats: &[ScrapeFormat],
    ) -> Result<Option<ScrapedPage>, SearchError> {
        if let Ok(mut calls) = self.scrape_calls.lock() {
            calls.push(url.to_string());
        }

        match self.pages.get(url) {
            Some(Ok(page)) => Ok(Some(page.clone())),
            Some(Err(e)) => Err(e.clone()),
            None => Ok(None),
        }
    }
}

/// Builds a search hit with a URL, title and snippet.
pub fn hit(url: &str, title: &str, description: &str) -> SearchResult {
    SearchResult {
        url: url.to_string(),
        title: Some(title.to_string()),
        description: Some(description.to_string()),
        ..SearchResult::default()
    }
}
