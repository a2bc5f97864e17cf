use tracing::{debug, warn};

use crate::llm::{complete_structured, LLM};
use crate::research::prompts::{tool_analysis_user, TOOL_ANALYSIS_SYSTEM};
use crate::research::CompanyAnalysis;

/// Asks the model for a structured analysis of a tool's site content.
///
/// Any failure, including a reply that does not fit [`CompanyAnalysis`],
/// yields [`CompanyAnalysis::failed`].
pub async fn analyze_company_content<L: LLM + ?Sized>(
    llm: &L,
    company_name: &str,
    content: &str,
) -> CompanyAnalysis {
    let prompt = tool_analysis_user(company_name, content);

    match complete_structured::<CompanyAnalysis, L>(llm, TOOL_ANALYSIS_SYSTEM, &prompt).await {
        Ok(analysis) => {
            debug!(company = company_name, pricing = %analysis.pricing_model, "analyzed company");
            analysis
        }
        Err(e) => {
            warn!(company = company_name, error = %e, "error analyzing company content");
            CompanyAnalysis::failed()
        }
    }
}
