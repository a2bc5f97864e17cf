use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    ScrapeFormat, ScrapedPage, SearchError, SearchOptions, SearchProvider, SearchResult,
    SearchResultSet,
};
use crate::config::{SearchConfig, DEFAULT_FIRECRAWL_URL};

/// Firecrawl API client (v1 `search` and `scrape` endpoints).
pub struct FirecrawlClient {
    api_key: String,
    base_url: String,
    client: Client,
}

impl FirecrawlClient {
    /// Creates a new Firecrawl client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_FIRECRAWL_URL.to_string(),
            client: Client::new(),
        }
    }

    /// Creates a client from configuration.
    ///
    /// A missing API key is an error: nothing in the pipeline works without
    /// search, so callers treat this as fatal at startup.
    pub fn from_config(config: &SearchConfig) -> Result<Self, SearchError> {
        if !config.provider.eq_ignore_ascii_case("firecrawl") {
            return Err(SearchError::UnsupportedProvider(config.provider.clone()));
        }
        let api_key = config.api_key_or_env().ok_or(SearchError::MissingApiKey)?;
        Ok(Self::new(api_key).with_base_url(&config.base_url))
    }

    /// Sets the API base URL (for self-hosted Firecrawl).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    async fn post<B, T>(&self, endpoint: &str, body: &B) -> Result<Option<T>, SearchError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned + Send,
    {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!(%url, "calling firecrawl");

        let response = self
            .client
            .post(&url)
            .header("authorization", format!("Bearer {}", self.api_key))
            .header("content-type", "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();

        if status == 429 {
            return Err(SearchError::RateLimited);
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(SearchError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let envelope: Envelope<T> = response
            .json()
            .await
            .map_err(|e| SearchError::ParseError(e.to_string()))?;

        envelope.into_result()
    }
}

#[async_trait]
impl SearchProvider for FirecrawlClient {
    async fn search(
        &self,
        query: &str,
        limit: usize,
        options: &SearchOptions,
    ) -> Result<SearchResultSet, SearchError> {
        let request = SearchRequest::new(query, limit, options);
        let data: Option<Vec<SearchResult>> = self.post("search", &request).await?;
        Ok(SearchResultSet {
            data: data.unwrap_or_default(),
        })
    }

    async fn scrape(
        &self,
        url: &str,
        formats: &[ScrapeFormat],
    ) -> Result<Option<ScrapedPage>, SearchError> {
        let request = ScrapeRequest {
            url,
            formats: formats.to_vec(),
        };
        self.post::<_, ScrapedPage>("scrape", &request).await
    }
}

#[derive(Debug, Serialize)]
struct SearchRequest<'a> {
    query: &'a str,
    limit: usize,
    #[serde(rename = "scrapeOptions", skip_serializing_if = "Option::is_none")]
    scrape_options: Option<ScrapeOptions>,
}

impl<'a> SearchRequest<'a> {
    fn new(query: &'a str, limit: usize, options: &SearchOptions) -> Self {
        let scrape_options = (!options.scrape_formats.is_empty()).then(|| ScrapeOptions {
            formats: options.scrape_formats.clone(),
        });
        Self {
            query,
            limit,
            scrape_options,
        }
    }
}

#[derive(Debug, Serialize)]
struct ScrapeOptions {
    formats: Vec<ScrapeFormat>,
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: Vec<ScrapeFormat>,
}

/// Firecrawl wraps every payload in `{ success, data, error }`.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default = "default_success")]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    error: Option<String>,
}

fn default_success() -> bool {
    true
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<Option<T>, SearchError> {
        if !self.success {
            return Err(SearchError::Unsuccessful(
                self.error.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }
        Ok(self.data)
    }
}
