use serde::de::DeserializeOwned;
use thiserror::Error;

/// Errors from a language model provider.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("No API key configured for the LLM provider")]
    MissingApiKey,

    #[error("LLM request failed: {0}")]
    RequestFailed(String),

    #[error("LLM provider returned {status}: {message}")]
    ApiError { status: u16, message: String },

    /// The reply arrived but did not have the expected shape.
    #[error("Could not parse LLM reply: {0}")]
    ParseError(String),

    #[error("LLM provider rate limit hit")]
    RateLimited,

    #[error("Network error talking to LLM provider: {0}")]
    Network(String),

    #[error("Unknown LLM provider '{0}' (expected openai, anthropic, ollama or openrouter)")]
    UnknownProvider(String),
}

impl From<reqwest::Error> for LLMError {
    fn from(err: reqwest::Error) -> Self {
        LLMError::Network(err.to_string())
    }
}

/// Maps a provider response to its decoded body or the matching error.
///
/// 429 is `RateLimited`, any other non-2xx status is `ApiError` carrying the
/// raw body.
pub(crate) async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, LLMError> {
    let status = response.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(LLMError::RateLimited);
    }
    if !status.is_success() {
        return Err(LLMError::ApiError {
            status: status.as_u16(),
            message: response.text().await.unwrap_or_default(),
        });
    }

    response
        .json()
        .await
        .map_err(|e| LLMError::ParseError(e.to_string()))
}
