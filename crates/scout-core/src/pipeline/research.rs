use tracing::{info, warn};

use super::{analyze_company_content, truncate_chars, StageContext};
use crate::config::{DEFAULT_MAX_TOOLS, UNKNOWN_TOOL_NAME};
use crate::llm::LLM;
use crate::research::{CompanyInfo, ResearchState, StateUpdate};
use crate::search::SearchProvider;

/// Researches the first `max_tools` extracted tools, one at a time.
///
/// With nothing extracted, names come from a direct search on the query.
pub async fn research_tools<L: LLM, S: SearchProvider>(
    ctx: &StageContext<'_, L, S>,
    state: &ResearchState,
) -> StateUpdate {
    let tool_names: Vec<String> = if state.extracted_tools.is_empty() {
        info!("no tools extracted, falling back to direct search");
        let results = ctx
            .search
            .search_companies(state.query(), ctx.config.fallback_results)
            .await;
        results
            .data
            .iter()
            .map(|result| result.display_title().unwrap_or(UNKNOWN_TOOL_NAME).to_string())
            .collect()
    } else {
        state.extracted_tools.clone()
    };

    // Hard ceiling even when a hand-built config skipped validation
    let cap = ctx.config.max_tools.min(DEFAULT_MAX_TOOLS);
    let tool_names: Vec<String> = tool_names.into_iter().take(cap).collect();
    info!(tools = %tool_names.join(", "), "researching specific tools");

    let mut companies = Vec::with_capacity(tool_names.len());
    for name in &tool_names {
        if let Some(company) = research_tool(ctx, name).await {
            companies.push(company);
        }
    }

    info!(researched = companies.len(), "research finished");
    StateUpdate::companies(companies)
}

/// Builds the record for one tool. `None` when no official site was found.
async fn research_tool<L: LLM, S: SearchProvider>(
    ctx: &StageContext<'_, L, S>,
    name: &str,
) -> Option<CompanyInfo> {
    let query = format!("{name} official site");
    let results = ctx
        .search
        .search_companies(&query, ctx.config.official_site_results)
        .await;

    let Some(site) = results.data.into_iter().find(|r| !r.url.trim().is_empty()) else {
        warn!(tool = name, "no official site found, skipping");
        return None;
    };

    let description = site
        .summary()
        .or_else(|| {
            site.markdown
                .as_deref()
                .map(|m| truncate_chars(m, ctx.config.article_content_chars))
        })
        .unwrap_or_default()
        .to_string();
    let mut company = CompanyInfo::provisional(name, site.url.clone(), description);

    match ctx.search.scrape_page(&company.website).await {
        Some(page) => {
            if let Some(content) = page.content() {
                let analysis = analyze_company_content(ctx.llm, &company.name, content).await;
                company.apply_analysis(analysis);
            }
        }
        None => warn!(tool = name, url = %company.website, "could not scrape official site"),
    }

    Some(company)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::research::FAILED_ANALYSIS_DESCRIPTION;
    use crate::search::{SearchResult, SearchService};
    use crate::testing::{hit, FakeSearchProvider, ScriptedLLM};

    fn state_with_tools(tools: &[&str]) -> ResearchState {
        ResearchState::new("vector databases").merge(StateUpdate::extracted_tools(
            tools.iter().map(|t| t.to_string()).collect(),
        ))
    }

    #[tokio::test]
    async fn test_research_caps_at_max_tools() {
        let tools = ["A", "B", "C", "D", "E", "F", "G"];
        let mut provider = FakeSearchProvider::new();
        for tool in tools {
            let url = format!("https://{}.example", tool.to_lowercase());
            provider = provider.with_search(&format!("{tool} official site"), vec![hit(&url, tool, "snippet")]);
        }
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::default();
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = research_tools(&ctx, &state_with_tools(&tools)).await;

        let names: Vec<String> = update.companies.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["A", "B", "C", "D", "E"]);
        assert_eq!(search.provider().search_calls().len(), 5);
        // No page content, so the model is never consulted
        assert!(llm.calls().is_empty());
    }

    #[tokio::test]
    async fn test_research_official_site_lookup() {
        let provider = FakeSearchProvider::new()
            .with_search("Qdrant official site", vec![hit("https://qdrant.tech", "Qdrant", "Vector search engine")]);
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::default();
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = research_tools(&ctx, &state_with_tools(&["Qdrant"])).await;
        let companies = update.companies.unwrap();

        assert_eq!(companies[0].website, "https://qdrant.tech");
        assert_eq!(companies[0].description, "Vector search engine");
        assert_eq!(companies[0].pricing_model, None);

        let calls = search.provider().search_calls();
        assert_eq!(calls[0].query, "Qdrant official site");
        assert_eq!(calls[0].limit, 1);
    }

    #[tokio::test]
    async fn test_research_keeps_company_when_analysis_fails() {
        let provider = FakeSearchProvider::new()
            .with_search("Weaviate official site", vec![hit("https://weaviate.io", "Weaviate", "snippet")])
            .with_page("https://weaviate.io", "# Weaviate\nAI-native database");
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::new(vec![Ok("not json".to_string())]);
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = research_tools(&ctx, &state_with_tools(&["Weaviate"])).await;
        let companies = update.companies.unwrap();

        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].website, "https://weaviate.io");
        assert_eq!(companies[0].pricing_model.as_deref(), Some("Unknown"));
        assert_eq!(companies[0].description, FAILED_ANALYSIS_DESCRIPTION);
    }

    #[tokio::test]
    async fn test_research_skips_tools_without_site() {
        let provider = FakeSearchProvider::new()
            .with_search("Chroma official site", vec![hit("https://trychroma.com", "Chroma", "")])
            .with_search("Ghost official site", vec![SearchResult::default()]);
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::default();
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = research_tools(&ctx, &state_with_tools(&["Ghost", "Nowhere", "Chroma"])).await;
        let companies = update.companies.unwrap();

        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].name, "Chroma");
    }

    #[tokio::test]
    async fn test_fallback_uses_titles_and_unknown() {
        let provider = FakeSearchProvider::new().with_search(
            "vector databases",
            vec![
                hit("https://milvus.io", "Milvus", ""),
                SearchResult {
                    url: "https://untitled.example".to_string(),
                    ..SearchResult::default()
                },
            ],
        );
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::default();
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        research_tools(&ctx, &ResearchState::new("vector databases")).await;

        let calls = search.provider().search_calls();
        assert_eq!(calls[0].query, "vector databases");
        assert_eq!(calls[0].limit, 5);
        assert_eq!(calls[1].query, "Milvus official site");
        assert_eq!(calls[2].query, "Unknown official site");
    }

    #[tokio::test]
    async fn test_fallback_is_capped_even_if_provider_ignores_limit() {
        let hits = (0..8).map(|i| hit(&format!("https://t{i}.example"), &format!("T{i}"), "")).collect();
        let provider = FakeSearchProvider::new()
            .with_search("vector databases", hits)
            .ignoring_limits();
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::default();
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        research_tools(&ctx, &ResearchState::new("vector databases")).await;

        // one fallback search plus one lookup per capped name
        assert_eq!(search.provider().search_calls().len(), 1 + 5);
    }

    #[tokio::test]
    async fn test_research_never_exceeds_five_companies() {
        let tools = ["A", "B", "C", "D", "E", "F", "G", "H"];
        let mut provider = FakeSearchProvider::new();
        for tool in tools {
            let url = format!("https://{}.example", tool.to_lowercase());
            provider = provider.with_search(&format!("{tool} official site"), vec![hit(&url, tool, "snippet")]);
        }
        let search = SearchService::new(provider);
        let llm = ScriptedLLM::default();
        let config = PipelineConfig {
            max_tools: 8,
            ..PipelineConfig::default()
        };
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = research_tools(&ctx, &state_with_tools(&tools)).await;

        assert_eq!(update.companies.unwrap().len(), 5);
        assert_eq!(search.provider().search_calls().len(), 5);
    }
}
