use thiserror::Error;

/// Errors that can occur while searching or scraping.
#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Missing search API key. Set FIRECRAWL_API_KEY or SCOUT_SEARCH_API_KEY.")]
    MissingApiKey,

    #[error("Unsupported search provider: {0}")]
    UnsupportedProvider(String),

    #[error("Search provider returned {status}: {message}")]
    ApiError { status: u16, message: String },

    #[error("Provider reported failure: {0}")]
    Unsuccessful(String),

    #[error("Could not parse search provider reply: {0}")]
    ParseError(String),

    #[error("Search provider rate limit hit")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for SearchError {
    fn from(err: reqwest::Error) -> Self {
        SearchError::Network(err.to_string())
    }
}
