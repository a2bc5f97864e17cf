use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::decode_response;
use super::{LLMError, OutputSchema, LLM};
use crate::config::{
    DEFAULT_MAX_TOKENS, DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_URL, DEFAULT_OPENROUTER_URL,
};

/// OpenAI-compatible API client.
///
/// Works with any provider that implements the OpenAI chat completions API:
/// - OpenAI
/// - Azure OpenAI
/// - Ollama (http://localhost:11434/v1)
/// - vLLM
/// - OpenRouter
/// - Groq
/// - And many more
///
/// Structured completions are sent with a `json_schema` response format.
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: Option<f32>,
    client: Client,
}

impl OpenAIClient {
    /// Creates a new OpenAI-compatible client.
    ///
    /// # Arguments
    /// * `base_url` - The API base URL (e.g., "https://api.openai.com/v1")
    /// * `api_key` - The API key (can be empty for local providers like Ollama)
    /// * `model` - The model name (e.g., "gpt-4o-mini", "llama3")
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
            client: Client::new(),
        }
    }

    /// Creates a client for OpenAI.
    pub fn openai(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(DEFAULT_OPENAI_URL, api_key, model)
    }

    /// Creates a client for Ollama (local).
    pub fn ollama(model: impl Into<String>) -> Self {
        Self::new(DEFAULT_OLLAMA_URL, "", model)
    }

    /// Creates a client for OpenRouter.
    pub fn openrouter(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self::new(DEFAULT_OPENROUTER_URL, api_key, model)
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

    fn build_request(
        &self,
        system: Option<&str>,
        prompt: &str,
        response_format: Option<ResponseFormat>,
    ) -> ChatRequest {
        let mut messages = Vec::with_capacity(2);

        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system".to_string(),
                content: sys.to_string(),
            });
        }

        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });

        ChatRequest {
            model: self.model.clone(),
            messages,
            max_tokens: Some(self.max_tokens),
            temperature: self.temperature,
            response_format,
        }
    }

    async fn send_request(&self, request: &ChatRequest) -> Result<String, LLMError> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!(model = %self.model, %url, structured = request.response_format.is_some(), "sending chat completion");

        let mut req = self.client.post(&url);
        // Local servers such as Ollama take no key
        if !self.api_key.is_empty() {
            req = req.bearer_auth(&self.api_key);
        }

        let reply: ChatResponse = decode_response(req.json(request).send().await?).await?;
        Ok(reply.first_content())
    }
}

#[async_trait]
impl LLM for OpenAIClient {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        let request = self.build_request(None, prompt, None);
        self.send_request(&request).await
    }

    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, LLMError> {
        let request = self.build_request(Some(system), prompt, None);
        self.send_request(&request).await
    }

    async fn complete_json(
        &self,
        system: &str,
        prompt: &str,
        schema: &OutputSchema,
    ) -> Result<String, LLMError> {
        let request = self.build_request(Some(system), prompt, Some(ResponseFormat::from(schema)));
        self.send_request(&request).await
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
    json_schema: JsonSchemaFormat,
}

#[derive(Debug, Serialize)]
struct JsonSchemaFormat {
    name: String,
    schema: serde_json::Value,
    // Strict mode demands every property be required, which optional fields are not.
    strict: bool,
}

impl From<&OutputSchema> for ResponseFormat {
    fn from(schema: &OutputSchema) -> Self {
        Self {
            format_type: "json_schema",
            json_schema: JsonSchemaFormat {
                name: schema.name.clone(),
                schema: schema.schema.clone(),
                strict: false,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

impl ChatResponse {
    /// Content of the first choice; empty when the model returned none.
    fn first_content(self) -> String {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = OpenAIClient::new(
            "https://api.example.com/v1",
            "test-key",
            "gpt-4",
        );
        assert_eq!(client.base_url, "https://api.example.com/v1");
        assert_eq!(client.model, "gpt-4");
        assert_eq!(client.temperature, None);
    }

    #[test]
    fn test_openai_client() {
        let client = OpenAIClient::openai("test-key", "gpt-4o-mini");
        assert_eq!(client.base_url, "https://api.openai.com/v1");
        assert_eq!(client.model, "gpt-4o-mini");
    }

    #[test]
    fn test_ollama_client() {
        let client = OpenAIClient::ollama("llama3");
        assert_eq!(client.base_url, "http://localhost:11434/v1");
        assert!(client.api_key.is_empty());
    }

    #[test]
    fn test_url_trailing_slash_removed() {
        let client = OpenAIClient::new(
            "https://api.example.com/v1/",
            "key",
            "model",
        );
        assert_eq!(client.base_url, "https://api.example.com/v1");
    }

    #[test]
    fn test_request_is_system_then_user() {
        let client = OpenAIClient::openai("key", "gpt-4o-mini").with_temperature(Some(0.1));
        let request = client.build_request(Some("be terse"), "hello", None);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "hello");
        assert!((body["temperature"].as_f64().unwrap() - 0.1).abs() < 1e-6);
        assert!(body.get("response_format").is_none());
    }

    #[test]
    fn test_structured_request_carries_schema() {
        let client = OpenAIClient::openai("key", "gpt-4o-mini");
        let schema = OutputSchema {
            name: "CompanyAnalysis".to_string(),
            schema: serde_json::json!({"type": "object"}),
        };
        let request = client.build_request(Some("sys"), "prompt", Some(ResponseFormat::from(&schema)));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "CompanyAnalysis");
        assert_eq!(body["response_format"]["json_schema"]["strict"], false);
    }

    #[test]
    fn test_response_with_null_content() {
        let raw = r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
        assert_eq!(parsed.first_content(), "");
    }
}
