use tracing::{debug, warn};

use super::{ScrapeFormat, ScrapedPage, SearchOptions, SearchProvider, SearchResultSet};

/// Soft-failing front for a [`SearchProvider`].
///
/// Provider errors are logged and turned into empty results so a single bad
/// request never aborts a research run.
pub struct SearchService<S: SearchProvider> {
    provider: S,
}

impl<S: SearchProvider> SearchService<S> {
    /// Wraps a provider.
    pub fn new(provider: S) -> Self {
        Self { provider }
    }

    /// Returns the wrapped provider.
    pub fn provider(&self) -> &S {
        &self.provider
    }

    /// Searches with markdown scraping enabled. Errors yield an empty set.
    pub async fn search_companies(&self, query: &str, num_results: usize) -> SearchResultSet {
        match self
            .provider
            .search(query, num_results, &SearchOptions::default())
            .await
        {
            Ok(results) => {
                debug!(query, hits = results.len(), "search finished");
                results
            }
            Err(e) => {
                warn!(query, error = %e, "error searching companies");
                SearchResultSet::default()
            }
        }
    }

    /// Scrapes a page as markdown.
    ///
    /// Returns `None` when the provider fails or the page has no content.
    pub async fn scrape_page(&self, url: &str) -> Option<ScrapedPage> {
        if url.trim().is_empty() {
            return None;
        }

        match self.provider.scrape(url, &[ScrapeFormat::Markdown]).await {
            Ok(Some(page)) if page.content().is_some() => Some(page),
            Ok(_) => {
                debug!(url, "scrape returned no content");
                None
            }
            Err(e) => {
                warn!(url, error = %e, "error scraping url");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{SearchError, SearchResult};
    use crate::testing::FakeSearchProvider;

    #[tokio::test]
    async fn test_search_error_becomes_empty_set() {
        let provider = FakeSearchProvider::new()
            .fail_search("vector databases", SearchError::RateLimited);
        let service = SearchService::new(provider);

        let results = service.search_companies("vector databases", 5).await;
        assert!(results.is_empty());

        let calls = service.provider().search_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].limit, 5);
    }

    #[tokio::test]
    async fn test_search_passes_results_through() {
        let provider = FakeSearchProvider::new().with_search(
            "qdrant official site",
            vec![SearchResult {
                url: "https://qdrant.tech".to_string(),
                ..SearchResult::default()
            }],
        );
        let service = SearchService::new(provider);

        let results = service.search_companies("qdrant official site", 1).await;
        assert_eq!(results.data[0].url, "https://qdrant.tech");
    }

    #[tokio::test]
    async fn test_scrape_failures_are_none() {
        let provider = FakeSearchProvider::new()
            .fail_scrape("https://down.example", SearchError::Network("timeout".to_string()))
            .with_page("https://empty.example", "   ")
            .with_page("https://ok.example", "# Hello");
        let service = SearchService::new(provider);

        assert!(service.scrape_page("https://down.example").await.is_none());
        assert!(service.scrape_page("https://empty.example").await.is_none());
        assert!(service.scrape_page("https://unknown.example").await.is_none());
        assert!(service.scrape_page("").await.is_none());

        let page = service.scrape_page("https://ok.example").await.unwrap();
        assert_eq!(page.content(), Some("# Hello"));

        // Empty URLs never reach the provider
        assert_eq!(service.provider().scrape_calls().len(), 4);
    }
}
