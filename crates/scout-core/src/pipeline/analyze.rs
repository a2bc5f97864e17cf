use tracing::{info, warn};

use super::{Stage, StageContext};
use crate::llm::LLM;
use crate::research::prompts::{recommendations_user, RECOMMENDATIONS_SYSTEM};
use crate::research::{CompanyInfo, ResearchState, StateUpdate};
use crate::search::SearchProvider;

/// Asks the model for a comparative recommendation over the researched tools.
///
/// A failed or empty reply is recorded as a failure instead of an analysis;
/// the driver decides whether that sinks the run.
pub async fn analyze_companies<L: LLM, S: SearchProvider>(
    ctx: &StageContext<'_, L, S>,
    state: &ResearchState,
) -> StateUpdate {
    info!(companies = state.companies.len(), "generating recommendations");

    let company_data = serialize_companies(&state.companies);
    let prompt = recommendations_user(state.query(), &company_data);

    match ctx.llm.complete_with_system(RECOMMENDATIONS_SYSTEM, &prompt).await {
        Ok(text) if !text.trim().is_empty() => StateUpdate::analysis(text),
        Ok(_) => {
            warn!("model returned an empty recommendation");
            StateUpdate::default().with_failure(Stage::Analyze, "model returned an empty recommendation")
        }
        Err(e) => {
            warn!(error = %e, "error generating recommendations");
            StateUpdate::default().with_failure(Stage::Analyze, e.to_string())
        }
    }
}

/// Pretty JSON for each company, separated by blank lines.
pub fn serialize_companies(companies: &[CompanyInfo]) -> String {
    companies
        .iter()
        .filter_map(|company| serde_json::to_string_pretty(company).ok())
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::llm::LLMError;
    use crate::search::SearchService;
    use crate::testing::{FakeSearchProvider, ScriptedLLM};

    fn researched_state() -> ResearchState {
        ResearchState::new("vector databases").merge(StateUpdate::companies(vec![
            CompanyInfo::provisional("Pinecone", "https://pinecone.io", "managed"),
            CompanyInfo::provisional("Qdrant", "https://qdrant.tech", "open source"),
        ]))
    }

    #[test]
    fn test_serialized_companies_parse_back() {
        let state = researched_state();
        let text = serialize_companies(&state.companies);

        let parsed: Vec<CompanyInfo> = text
            .split("\n\n")
            .map(|chunk| serde_json::from_str(chunk).unwrap())
            .collect();
        assert_eq!(parsed, state.companies);
    }

    #[tokio::test]
    async fn test_analyze_sends_every_company() {
        let search = SearchService::new(FakeSearchProvider::new());
        let llm = ScriptedLLM::new(vec![Ok("Use Qdrant for self-hosting.".to_string())]);
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = analyze_companies(&ctx, &researched_state()).await;

        assert_eq!(update.analysis.as_deref(), Some("Use Qdrant for self-hosting."));
        let calls = llm.calls();
        assert_eq!(calls[0].system.as_deref(), Some(RECOMMENDATIONS_SYSTEM));
        assert!(calls[0].prompt.contains("vector databases"));
        assert!(calls[0].prompt.contains("\"name\": \"Pinecone\""));
        assert!(calls[0].prompt.contains("\"name\": \"Qdrant\""));
    }

    #[tokio::test]
    async fn test_analyze_contains_model_failure() {
        let search = SearchService::new(FakeSearchProvider::new());
        let llm = ScriptedLLM::new(vec![Err(LLMError::Network("reset".to_string()))]);
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = analyze_companies(&ctx, &researched_state()).await;

        assert!(update.analysis.is_none());
        assert_eq!(update.failures[0].stage, Stage::Analyze);
        assert!(update.failures[0].message.contains("reset"));
    }

    #[tokio::test]
    async fn test_analyze_blank_reply_is_failure() {
        let search = SearchService::new(FakeSearchProvider::new());
        let llm = ScriptedLLM::new(vec![Ok("  \n".to_string())]);
        let config = PipelineConfig::default();
        let ctx = StageContext { llm: &llm, search: &search, config: &config };

        let update = analyze_companies(&ctx, &researched_state()).await;

        assert!(update.analysis.is_none());
        assert_eq!(update.failures.len(), 1);
    }
}
