use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::decode_response;
use super::{LLMError, LLM};
use crate::config::{
    DEFAULT_ANTHROPIC_API_VERSION, DEFAULT_ANTHROPIC_MODEL, DEFAULT_ANTHROPIC_URL,
    DEFAULT_MAX_TOKENS,
};

/// Claude API client.
///
/// Structured completions use the trait's default: the schema travels in the
/// system prompt and the JSON is pulled out of the text reply.
pub struct ClaudeClient {
    api_key: String,
    api_url: String,
    api_version: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    client: Client,
}

impl ClaudeClient {
    /// Creates a new Claude client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_url: DEFAULT_ANTHROPIC_URL.to_string(),
            api_version: DEFAULT_ANTHROPIC_API_VERSION.to_string(),
            model: DEFAULT_ANTHROPIC_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            client: Client::new(),
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the maximum tokens for responses.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    /// Sets the API URL (for proxies or enterprise deployments).
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Sets the API version.
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    fn build_request(&self, system: Option<&str>, prompt: &str) -> ClaudeRequest {
        ClaudeRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: system.map(str::to_string),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        }
    }

    async fn send_request(&self, request: &ClaudeRequest) -> Result<String, LLMError> {
        debug!(model = %self.model, url = %self.api_url, "sending messages request");

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", &self.api_version)
            .json(request)
            .send()
            .await?;

        let reply: ClaudeResponse = decode_response(response).await?;
        Ok(reply.text())
    }
}

#[async_trait]
impl LLM for ClaudeClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let request = self.build_request(None, prompt);
        self.send_request(&request).await
    }

    async fn complete_with_system(&self, system: &str, prompt: &str) -> Result<String, LLMError> {
        let request = self.build_request(Some(system), prompt);
        self.send_request(&request).await
    }
}

#[derive(Debug, Serialize)]
struct ClaudeRequest {
    model: String,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ClaudeResponse {
    content: Vec<ContentBlock>,
}

impl ClaudeResponse {
    /// Concatenates the text blocks of the reply.
    fn text(self) -> String {
        self.content
            .into_iter()
            .filter(|block| block.content_type == "text")
            .map(|block| block.text)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let client = ClaudeClient::new("test-key")
            .with_model("claude-3-opus")
            .with_api_url("https://proxy.example.com/v1/messages")
            .with_temperature(Some(0.1));
        assert_eq!(client.model, "claude-3-opus");
        assert_eq!(client.api_url, "https://proxy.example.com/v1/messages");
        assert_eq!(client.temperature, Some(0.1));
    }

    #[test]
    fn test_request_shape() {
        let client = ClaudeClient::new("test-key");
        let body = serde_json::to_value(client.build_request(Some("sys"), "hi")).unwrap();

        assert_eq!(body["system"], "sys");
        assert_eq!(body["messages"][0]["role"], "user");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn test_response_text_skips_non_text_blocks() {
        let raw = r#"{"content":[
            {"type":"text","text":"Pinecone\n"},
            {"type":"tool_use","id":"x","name":"n","input":{}},
            {"type":"text","text":"Qdrant"}
        ]}"#;
        let parsed: ClaudeResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), "Pinecone\nQdrant");
    }
}
