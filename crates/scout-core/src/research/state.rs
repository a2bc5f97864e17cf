use serde::{Deserialize, Serialize};

use super::CompanyInfo;
use crate::pipeline::Stage;
use crate::search::SearchResult;

/// The record threaded through the pipeline.
///
/// Built once per run from the query; every stage returns a [`StateUpdate`]
/// which [`ResearchState::merge`] folds in. `query` has no setter and no
/// update field, so it survives a run verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResearchState {
    query: String,
    /// Tool names in extraction order.
    #[serde(default)]
    pub extracted_tools: Vec<String>,
    /// Researched tools in the order their names were processed.
    #[serde(default)]
    pub companies: Vec<CompanyInfo>,
    /// Article hits gathered while extracting tool names.
    #[serde(default)]
    pub search_results: Vec<SearchResult>,
    #[serde(default)]
    pub analysis: Option<String>,
    /// Failures stages contained instead of aborting the run.
    #[serde(default)]
    pub failures: Vec<StageFailure>,
}

impl ResearchState {
    /// Creates the initial state for a run.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Folds a partial update into the state.
    ///
    /// `Some` fields replace, `None` fields leave the current value alone and
    /// failures are appended in order.
    pub fn merge(mut self, update: StateUpdate) -> Self {
        if let Some(tools) = update.extracted_tools {
            self.extracted_tools = tools;
        }
        if let Some(companies) = update.companies {
            self.companies = companies;
        }
        if let Some(results) = update.search_results {
            self.search_results = results;
        }
        if let Some(analysis) = update.analysis {
            self.analysis = Some(analysis);
        }
        self.failures.extend(update.failures);
        self
    }
}

/// The fields a stage changed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StateUpdate {
    pub extracted_tools: Option<Vec<String>>,
    pub companies: Option<Vec<CompanyInfo>>,
    pub search_results: Option<Vec<SearchResult>>,
    pub analysis: Option<String>,
    pub failures: Vec<StageFailure>,
}

impl StateUpdate {
    pub fn extracted_tools(tools: Vec<String>) -> Self {
        Self {
            extracted_tools: Some(tools),
            ..Self::default()
        }
    }

    pub fn companies(companies: Vec<CompanyInfo>) -> Self {
        Self {
            companies: Some(companies),
            ..Self::default()
        }
    }

    pub fn analysis(analysis: impl Into<String>) -> Self {
        Self {
            analysis: Some(analysis.into()),
            ..Self::default()
        }
    }

    pub fn with_search_results(mut self, results: Vec<SearchResult>) -> Self {
        self.search_results = Some(results);
        self
    }

    pub fn with_failure(mut self, stage: Stage, message: impl Into<String>) -> Self {
        self.failures.push(StageFailure {
            stage,
            message: message.into(),
        });
        self
    }
}

/// A failure a stage recovered from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFailure {
    pub stage: Stage,
    pub message: String,
}
