use crate::config::{
    LLMConfig, DEFAULT_ANTHROPIC_MODEL, DEFAULT_MAX_TOKENS, DEFAULT_OLLAMA_MODEL,
    DEFAULT_OLLAMA_URL, DEFAULT_OPENAI_MODEL, DEFAULT_OPENAI_URL, DEFAULT_OPENROUTER_URL,
    DEFAULT_TEMPERATURE,
};
use super::{ClaudeClient, LLMError, OpenAIClient, LLM};

/// LLM Provider configuration.
#[derive(Debug, Clone)]
pub enum Provider {
    /// OpenAI-compatible endpoint (default, most universal)
    OpenAI {
        base_url: Option<String>,
        api_key: Option<String>,
        model: Option<String>,
    },
    /// Anthropic Claude
    Anthropic {
        api_key: Option<String>,
        model: Option<String>,
        api_url: Option<String>,
        api_version: Option<String>,
    },
    /// Local Ollama instance
    Ollama {
        base_url: Option<String>,
        model: String,
    },
    /// OpenRouter (OpenAI-compatible, key required)
    OpenRouter {
        api_key: Option<String>,
        model: Option<String>,
    },
}

impl Default for Provider {
    fn default() -> Self {
        Provider::OpenAI {
            base_url: None,
            api_key: None,
            model: None,
        }
    }
}

impl Provider {
    /// Creates a provider from LLMConfig.
    pub fn from_config(config: &LLMConfig) -> Result<Self, LLMError> {
        let provider = match config.provider.to_lowercase().as_str() {
            "openai" | "openai-compatible" => Provider::OpenAI {
                base_url: config.base_url.clone(),
                api_key: config.api_key_or_env(),
                model: config.model.clone(),
            },
            "anthropic" | "claude" => Provider::Anthropic {
                api_key: config.api_key_or_env(),
                model: config.model.clone(),
                api_url: config.base_url.clone(),
                api_version: config.api_version.clone(),
            },
            "ollama" => Provider::Ollama {
                base_url: config.base_url.clone(),
                model: config.model_or_default(),
            },
            "openrouter" => Provider::OpenRouter {
                api_key: config.api_key_or_env(),
                model: config.model.clone(),
            },
            other => return Err(LLMError::UnknownProvider(other.to_string())),
        };
        Ok(provider)
    }

    /// Builds a client straight from configuration, honouring its
    /// token and temperature settings.
    pub fn build_from_config(config: &LLMConfig) -> Result<Box<dyn LLM>, LLMError> {
        Self::from_config(config)?.build_with(config.max_tokens, config.temperature)
    }

    /// Creates an LLM client with default sampling settings.
    pub fn build(self) -> Result<Box<dyn LLM>, LLMError> {
        self.build_with(DEFAULT_MAX_TOKENS, Some(DEFAULT_TEMPERATURE))
    }

    /// Creates an LLM client from the provider configuration.
    pub fn build_with(
        self,
        max_tokens: u32,
        temperature: Option<f32>,
    ) -> Result<Box<dyn LLM>, LLMError> {
        match self {
            Provider::OpenAI { base_url, api_key, model } => {
                let base = base_url.unwrap_or_else(|| DEFAULT_OPENAI_URL.to_string());
                let key = api_key
                    .or_else(|| std::env::var("OPENAI_API_KEY").ok())
                    .unwrap_or_default();
                let mdl = model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

                Ok(Box::new(
                    OpenAIClient::new(base, key, mdl)
                        .with_max_tokens(max_tokens)
                        .with_temperature(temperature),
                ))
            }

            Provider::Anthropic { api_key, model, api_url, api_version } => {
                let key = api_key
                    .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
                    .ok_or(LLMError::MissingApiKey)?;

                let mut client = ClaudeClient::new(key)
                    .with_model(model.unwrap_or_else(|| DEFAULT_ANTHROPIC_MODEL.to_string()))
                    .with_max_tokens(max_tokens)
                    .with_temperature(temperature);
                if let Some(url) = api_url {
                    client = client.with_api_url(url);
                }
                if let Some(version) = api_version {
                    client = client.with_api_version(version);
                }

                Ok(Box::new(client))
            }

            Provider::Ollama { base_url, model } => {
                let base = base_url
                    .or_else(|| {
                        std::env::var("OLLAMA_HOST")
                            .ok()
                            .map(|h| format!("{}/v1", h.trim_end_matches('/')))
                    })
                    .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());

                Ok(Box::new(
                    OpenAIClient::new(base, "", model)
                        .with_max_tokens(max_tokens)
                        .with_temperature(temperature),
                ))
            }

            Provider::OpenRouter { api_key, model } => {
                let key = api_key
                    .or_else(|| std::env::var("OPENROUTER_API_KEY").ok())
                    .ok_or(LLMError::MissingApiKey)?;
                let mdl = model.unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());

                Ok(Box::new(
                    OpenAIClient::new(DEFAULT_OPENROUTER_URL, key, mdl)
                        .with_max_tokens(max_tokens)
                        .with_temperature(temperature),
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_provider() {
        let provider = Provider::default();
        assert!(matches!(provider, Provider::OpenAI { .. }));
    }

    #[test]
    fn test_ollama_provider_build() {
        let provider = Provider::Ollama {
            base_url: None,
            model: DEFAULT_OLLAMA_MODEL.to_string(),
        };
        // Should succeed without API key
        assert!(provider.build().is_ok());
    }

    #[test]
    fn test_openai_provider_build() {
        let provider = Provider::OpenAI {
            base_url: Some("http://localhost:8080/v1".to_string()),
            api_key: Some("test".to_string()),
            model: Some("local-model".to_string()),
        };
        assert!(provider.build().is_ok());
    }

    #[test]
    fn test_anthropic_with_explicit_key() {
        let provider = Provider::Anthropic {
            api_key: Some("sk-ant-test".to_string()),
            model: None,
            api_url: None,
            api_version: None,
        };
        assert!(provider.build().is_ok());
    }

    #[test]
    fn test_from_config() {
        let config = LLMConfig {
            provider: "ollama".to_string(),
            model: Some("codellama".to_string()),
            ..LLMConfig::default()
        };

        let provider = Provider::from_config(&config).unwrap();
        assert!(matches!(provider, Provider::Ollama { model, .. } if model == "codellama"));
    }

    #[test]
    fn test_from_config_unknown_provider() {
        let config = LLMConfig {
            provider: "carrier-pigeon".to_string(),
            ..LLMConfig::default()
        };

        let result = Provider::from_config(&config);
        assert!(matches!(result, Err(LLMError::UnknownProvider(name)) if name == "carrier-pigeon"));
    }
}
