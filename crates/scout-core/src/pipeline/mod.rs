//! The extract → research → analyze pipeline.
//!
//! Each stage is an async function from the current [`ResearchState`] to a
//! [`StateUpdate`]; [`ResearchWorkflow`] runs them in [`Stage`] order and
//! merges the updates.
//!
//! [`ResearchState`]: crate::research::ResearchState
//! [`StateUpdate`]: crate::research::StateUpdate

mod analysis;
mod analyze;
mod extract;
mod research;
mod workflow;

pub use analysis::analyze_company_content;
pub use analyze::{analyze_companies, serialize_companies};
pub use extract::{extract_tools, parse_tool_names};
pub use research::research_tools;
pub use workflow::{ResearchWorkflow, WorkflowError};

use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::llm::LLM;
use crate::search::{SearchProvider, SearchService};

/// A step of the pipeline.
///
/// Stages run linearly:
/// Extract → Research → Analyze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Find candidate tool names in comparison articles
    Extract,
    /// Look up and analyze each tool's official site
    Research,
    /// Compare the researched tools and recommend one
    Analyze,
}

impl Stage {
    /// The entry stage.
    pub const fn first() -> Stage {
        Stage::Extract
    }

    /// Returns the next stage, or None after the last one.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Extract => Some(Stage::Research),
            Stage::Research => Some(Stage::Analyze),
            Stage::Analyze => None,
        }
    }

    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Stage::Extract => "Extract",
            Stage::Research => "Research",
            Stage::Analyze => "Analyze",
        }
    }
}

/// What every stage gets to work with.
pub struct StageContext<'a, L: LLM, S: SearchProvider> {
    pub llm: &'a L,
    pub search: &'a SearchService<S>,
    pub config: &'a PipelineConfig,
}

/// Returns at most `max` characters of `s`, never splitting a code point.
pub(crate) fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_progression() {
        assert_eq!(Stage::first(), Stage::Extract);
        assert_eq!(Stage::Extract.next(), Some(Stage::Research));
        assert_eq!(Stage::Research.next(), Some(Stage::Analyze));
        assert_eq!(Stage::Analyze.next(), None);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("hello", 3), "hel");
        assert_eq!(truncate_chars("hi", 10), "hi");
        assert_eq!(truncate_chars("日本語テキスト", 3), "日本語");
        assert_eq!(truncate_chars("", 3), "");
    }
}
