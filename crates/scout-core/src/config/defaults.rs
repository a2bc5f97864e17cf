//! Default values for Scout configuration.
//!
//! All hardcoded defaults are centralized here for easy maintenance.

// ============================================================================
// LLM Defaults
// ============================================================================

/// Default LLM provider.
pub const DEFAULT_LLM_PROVIDER: &str = "openai";

/// Default max tokens for LLM responses.
pub const DEFAULT_MAX_TOKENS: u32 = 4096;

/// Default sampling temperature. Kept low so extraction stays deterministic.
pub const DEFAULT_TEMPERATURE: f32 = 0.1;

// OpenAI defaults
/// Default OpenAI API URL.
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
/// Default OpenAI model.
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

// Anthropic defaults
/// Default Anthropic API URL.
pub const DEFAULT_ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";
/// Default Anthropic model.
pub const DEFAULT_ANTHROPIC_MODEL: &str = "claude-sonnet-4-20250514";
/// Default Anthropic API version.
pub const DEFAULT_ANTHROPIC_API_VERSION: &str = "2023-06-01";

// Ollama defaults
/// Default Ollama API URL.
pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/v1";
/// Default Ollama model.
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3";

// OpenRouter defaults
/// Default OpenRouter API URL.
pub const DEFAULT_OPENROUTER_URL: &str = "https://openrouter.ai/api/v1";

// ============================================================================
// Search Defaults
// ============================================================================

/// Default search/scrape provider.
pub const DEFAULT_SEARCH_PROVIDER: &str = "firecrawl";

/// Default Firecrawl API URL.
pub const DEFAULT_FIRECRAWL_URL: &str = "https://api.firecrawl.dev/v1";

// ============================================================================
// Pipeline Defaults
// ============================================================================

/// Number of comparison articles fetched by the extract stage.
pub const DEFAULT_ARTICLE_RESULTS: usize = 3;

/// Characters kept from each scraped article.
pub const DEFAULT_ARTICLE_CONTENT_CHARS: usize = 1500;

/// Maximum number of tools researched per run.
pub const DEFAULT_MAX_TOOLS: usize = 5;

/// Number of results requested when falling back to a direct search.
pub const DEFAULT_FALLBACK_RESULTS: usize = 5;

/// Number of results requested when looking up a tool's official site.
pub const DEFAULT_OFFICIAL_SITE_RESULTS: usize = 1;

/// Name used for fallback search hits that carry no title.
pub const UNKNOWN_TOOL_NAME: &str = "Unknown";
