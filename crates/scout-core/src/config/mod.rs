//! Configuration management for Scout.
//!
//! Configuration is loaded from multiple sources with the following priority:
//! 1. Environment variables (highest priority)
//! 2. Project-local `scout.toml` file
//! 3. User config `~/.config/scout/config.toml`
//! 4. Built-in defaults (lowest priority)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

mod defaults;

pub use defaults::*;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LLM provider configuration.
    pub llm: LLMConfig,

    /// Search/scrape provider configuration.
    pub search: SearchConfig,

    /// Pipeline tuning.
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Load configuration from default locations.
    ///
    /// Searches for config in order:
    /// 1. `./scout.toml` (project local)
    /// 2. `~/.config/scout/config.toml` (user config)
    /// 3. Falls back to defaults
    ///
    /// Environment overrides are applied in every case.
    pub fn load() -> Result<Self, ConfigError> {
        if Path::new("scout.toml").exists() {
            return Self::from_file("scout.toml");
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("scout").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Apply environment variable overrides.
    pub fn apply_env_overrides(&mut self) {
        // LLM overrides
        if let Ok(provider) = std::env::var("SCOUT_LLM_PROVIDER") {
            self.llm.provider = provider;
        }
        if let Ok(model) = std::env::var("SCOUT_LLM_MODEL") {
            self.llm.model = Some(model);
        }
        if let Ok(url) = std::env::var("SCOUT_LLM_BASE_URL") {
            self.llm.base_url = Some(url);
        }
        if let Ok(key) = std::env::var("SCOUT_LLM_API_KEY") {
            self.llm.api_key = Some(key);
        }
        if let Ok(tokens) = std::env::var("SCOUT_LLM_MAX_TOKENS") {
            if let Ok(n) = tokens.parse() {
                self.llm.max_tokens = n;
            }
        }
        if let Ok(temperature) = std::env::var("SCOUT_LLM_TEMPERATURE") {
            if let Ok(t) = temperature.parse() {
                self.llm.temperature = Some(t);
            }
        }

        // Search overrides
        if let Ok(url) = std::env::var("SCOUT_SEARCH_BASE_URL") {
            self.search.base_url = url;
        }
        if let Ok(key) = std::env::var("SCOUT_SEARCH_API_KEY") {
            self.search.api_key = Some(key);
        }

        // Pipeline overrides
        if let Ok(max) = std::env::var("SCOUT_MAX_TOOLS") {
            if let Ok(n) = max.parse() {
                self.pipeline.max_tools = n;
            }
        }
    }

    /// Rejects settings that would make the pipeline do nothing useful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=DEFAULT_MAX_TOOLS).contains(&self.pipeline.max_tools) {
            return Err(ConfigError::Invalid(format!(
                "pipeline.max_tools must be between 1 and {DEFAULT_MAX_TOOLS}, got {}",
                self.pipeline.max_tools
            )));
        }
        if self.pipeline.fallback_results > DEFAULT_FALLBACK_RESULTS {
            return Err(ConfigError::Invalid(format!(
                "pipeline.fallback_results must be at most {DEFAULT_FALLBACK_RESULTS}, got {}",
                self.pipeline.fallback_results
            )));
        }
        if self.pipeline.official_site_results == 0 {
            return Err(ConfigError::Invalid(
                "pipeline.official_site_results must be at least 1".to_string(),
            ));
        }
        if let Some(t) = self.llm.temperature {
            if !(0.0..=2.0).contains(&t) {
                return Err(ConfigError::Invalid(format!(
                    "llm.temperature must be between 0.0 and 2.0, got {t}"
                )));
            }
        }
        Ok(())
    }

    /// Create a default config file content as a string.
    pub fn default_config_string() -> String {
        let config = Config::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

/// LLM provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LLMConfig {
    /// Provider name: "openai", "anthropic", "ollama", or "openrouter".
    pub provider: String,

    /// Model name (provider-specific).
    pub model: Option<String>,

    /// Base URL for API (for openai-compatible providers).
    pub base_url: Option<String>,

    /// API key (can also be set via environment variable).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Maximum tokens for response.
    pub max_tokens: u32,

    /// Sampling temperature.
    pub temperature: Option<f32>,

    /// API version (for Anthropic).
    pub api_version: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_LLM_PROVIDER.to_string(),
            model: None, // Use provider default
            base_url: None, // Use provider default
            api_key: None, // Load from env
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: Some(DEFAULT_TEMPERATURE),
            api_version: Some(DEFAULT_ANTHROPIC_API_VERSION.to_string()),
        }
    }
}

impl LLMConfig {
    /// Get the model name, falling back to provider defaults.
    pub fn model_or_default(&self) -> String {
        self.model.clone().unwrap_or_else(|| {
            match self.provider.as_str() {
                "anthropic" | "claude" => DEFAULT_ANTHROPIC_MODEL.to_string(),
                "ollama" => DEFAULT_OLLAMA_MODEL.to_string(),
                _ => DEFAULT_OPENAI_MODEL.to_string(),
            }
        })
    }

    /// Get the base URL, falling back to provider defaults.
    pub fn base_url_or_default(&self) -> String {
        self.base_url.clone().unwrap_or_else(|| {
            match self.provider.as_str() {
                "anthropic" | "claude" => DEFAULT_ANTHROPIC_URL.to_string(),
                "ollama" => DEFAULT_OLLAMA_URL.to_string(),
                "openrouter" => DEFAULT_OPENROUTER_URL.to_string(),
                _ => DEFAULT_OPENAI_URL.to_string(),
            }
        })
    }

    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        self.api_key.clone()
            .or_else(|| match self.provider.as_str() {
                "anthropic" | "claude" => std::env::var("ANTHROPIC_API_KEY").ok(),
                "openrouter" => std::env::var("OPENROUTER_API_KEY").ok(),
                _ => std::env::var("OPENAI_API_KEY").ok(),
            })
    }
}

/// Search/scrape provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Provider name. Only "firecrawl" is supported.
    pub provider: String,

    /// Base URL for the provider API.
    pub base_url: String,

    /// API key (can also be set via `FIRECRAWL_API_KEY`).
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            provider: DEFAULT_SEARCH_PROVIDER.to_string(),
            base_url: DEFAULT_FIRECRAWL_URL.to_string(),
            api_key: None,
        }
    }
}

impl SearchConfig {
    /// Get API key from config or environment.
    pub fn api_key_or_env(&self) -> Option<String> {
        let non_blank = |key: &String| !key.trim().is_empty();
        self.api_key
            .clone()
            .filter(non_blank)
            .or_else(|| std::env::var("FIRECRAWL_API_KEY").ok())
            .filter(non_blank)
    }
}

/// Pipeline tuning knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Comparison articles fetched by the extract stage.
    pub article_results: usize,

    /// Characters kept from each scraped article.
    pub article_content_chars: usize,

    /// Upper bound on the number of tools researched.
    pub max_tools: usize,

    /// Results requested by the research stage's fallback search.
    pub fallback_results: usize,

    /// Results requested per official-site lookup.
    pub official_site_results: usize,

    /// Fail the run when the analyze stage produced no recommendation.
    pub require_analysis: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            article_results: DEFAULT_ARTICLE_RESULTS,
            article_content_chars: DEFAULT_ARTICLE_CONTENT_CHARS,
            max_tools: DEFAULT_MAX_TOOLS,
            fallback_results: DEFAULT_FALLBACK_RESULTS,
            official_site_results: DEFAULT_OFFICIAL_SITE_RESULTS,
            require_analysis: true,
        }
    }
}
