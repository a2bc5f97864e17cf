use tracing::{info, warn};

use super::{truncate_chars, Stage, StageContext};
use crate::llm::LLM;
use crate::research::prompts::{tool_extraction_user, TOOL_EXTRACTION_SYSTEM};
use crate::research::{ResearchState, StateUpdate};
use crate::search::SearchProvider;

/// Finds candidate tool names in comparison articles about the query.
///
/// Never fails: search and scrape problems shrink the article text, and a
/// model failure yields an empty tool list plus a recorded failure.
pub async fn extract_tools<L: LLM, S: SearchProvider>(
    ctx: &StageContext<'_, L, S>,
    state: &ResearchState,
) -> StateUpdate {
    info!(query = state.query(), "finding articles");

    let article_query = format!("{} tools comparison best alternatives", state.query());
    let results = ctx
        .search
        .search_companies(&article_query, ctx.config.article_results)
        .await;

    let mut pages = Vec::with_capacity(results.len());
    for result in &results.data {
        let scraped = ctx.search.scrape_page(&result.url).await;
        let content = scraped
            .as_ref()
            .and_then(|page| page.content())
            .or_else(|| result.markdown.as_deref().filter(|m| !m.trim().is_empty()));

        if let Some(content) = content {
            pages.push(truncate_chars(content, ctx.config.article_content_chars).to_string());
        }
    }
    let all_content = pages.join("\n\n");

    let prompt = tool_extraction_user(state.query(), &all_content);
    let update = match ctx.llm.complete_with_system(TOOL_EXTRACTION_SYSTEM, &prompt).await {
        Ok(response) => {
            let tools = parse_tool_names(&response);
            let preview: Vec<&str> = tools.iter().take(5).map(String::as_str).collect();
            info!(count = tools.len(), tools = %preview.join(", "), "extracted tools");
            StateUpdate::extracted_tools(tools)
        }
        Err(e) => {
            warn!(error = %e, "error extracting tools");
            StateUpdate::extracted_tools(Vec::new()).with_failure(Stage::Extract, e.to_string())
        }
    };

    update.with_search_results(results.data)
}

/// One name per non-blank line, trimmed, in reply order.
pub fn parse_tool_names(response: &str) -> Vec<String> {
    response
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
