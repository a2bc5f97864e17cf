//! Environment overrides live in their own test binary so the variables they
//! set cannot leak into tests running in parallel.

use scout_core::{Config, FirecrawlClient, SearchConfig, SearchError};

#[test]
fn test_env_overrides_and_missing_search_key() {
    std::env::set_var("SCOUT_LLM_PROVIDER", "ollama");
    std::env::set_var("SCOUT_LLM_TEMPERATURE", "0.7");
    std::env::set_var("SCOUT_MAX_TOOLS", "2");
    std::env::set_var("SCOUT_LLM_MAX_TOKENS", "not-a-number");

    let mut config = Config::default();
    config.apply_env_overrides();

    assert_eq!(config.llm.provider, "ollama");
    assert_eq!(config.llm.temperature, Some(0.7));
    assert_eq!(config.pipeline.max_tools, 2);
    // Unparseable numbers are ignored
    assert_eq!(config.llm.max_tokens, Config::default().llm.max_tokens);

    std::env::remove_var("SCOUT_LLM_PROVIDER");
    std::env::remove_var("SCOUT_LLM_TEMPERATURE");
    std::env::remove_var("SCOUT_MAX_TOOLS");
    std::env::remove_var("SCOUT_LLM_MAX_TOKENS");

    // No search credential anywhere is fatal
    std::env::remove_var("FIRECRAWL_API_KEY");
    let result = FirecrawlClient::from_config(&SearchConfig::default());
    assert!(matches!(result, Err(SearchError::MissingApiKey)));

    std::env::set_var("FIRECRAWL_API_KEY", "fc-from-env");
    assert!(FirecrawlClient::from_config(&SearchConfig::default()).is_ok());
    std::env::remove_var("FIRECRAWL_API_KEY");
}
