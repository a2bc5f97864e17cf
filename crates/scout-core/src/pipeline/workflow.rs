use thiserror::Error;
use tracing::{debug, info, instrument};

use super::{analyze_companies, extract_tools, research_tools, Stage, StageContext};
use crate::config::PipelineConfig;
use crate::llm::LLM;
use crate::research::{ResearchState, StateUpdate};
use crate::search::{SearchProvider, SearchService};

/// Runs the research pipeline for a query.
///
/// Holds one client per provider for its whole lifetime; every run reuses
/// them.
pub struct ResearchWorkflow<L: LLM, S: SearchProvider> {
    llm: L,
    search: SearchService<S>,
    config: PipelineConfig,
}

impl<L: LLM, S: SearchProvider> ResearchWorkflow<L, S> {
    /// Creates a new workflow around the given clients.
    pub fn new(llm: L, search: S, config: PipelineConfig) -> Self {
        Self {
            llm,
            search: SearchService::new(search),
            config,
        }
    }

    pub fn llm(&self) -> &L {
        &self.llm
    }

    pub fn search(&self) -> &SearchService<S> {
        &self.search
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Runs every stage in order and returns the final state.
    ///
    /// Stages contain their own failures. The run as a whole fails only when
    /// `require_analysis` is set and no recommendation came out of it.
    #[instrument(skip(self), fields(query = %query))]
    pub async fn run(&self, query: &str) -> Result<ResearchState, WorkflowError> {
        let ctx = StageContext {
            llm: &self.llm,
            search: &self.search,
            config: &self.config,
        };

        let mut state = ResearchState::new(query);
        let mut next = Some(Stage::first());

        while let Some(stage) = next {
            debug!(stage = stage.display_name(), "running stage");
            let update = self.run_stage(stage, &ctx, &state).await;
            state = state.merge(update);
            next = stage.next();
        }

        if self.config.require_analysis && state.analysis.is_none() {
            let reason = state
                .failures
                .iter()
                .rev()
                .find(|f| f.stage == Stage::Analyze)
                .map(|f| f.message.clone())
                .unwrap_or_else(|| "no recommendation produced".to_string());
            return Err(WorkflowError::AnalysisUnavailable {
                reason,
                state: Box::new(state),
            });
        }

        info!(
            tools = state.extracted_tools.len(),
            companies = state.companies.len(),
            failures = state.failures.len(),
            "research complete"
        );
        Ok(state)
    }

    async fn run_stage(
        &self,
        stage: Stage,
        ctx: &StageContext<'_, L, S>,
        state: &ResearchState,
    ) -> StateUpdate {
        match stage {
            Stage::Extract => extract_tools(ctx, state).await,
            Stage::Research => research_tools(ctx, state).await,
            Stage::Analyze => analyze_companies(ctx, state).await,
        }
    }
}

/// Errors that end a run.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// The analyze stage produced nothing. Carries everything gathered
    /// before that point.
    #[error("Analysis unavailable: {reason}")]
    AnalysisUnavailable {
        reason: String,
        state: Box<ResearchState>,
    },
}

impl WorkflowError {
    /// The state reached before the run failed.
    pub fn partial_state(&self) -> &ResearchState {
        match self {
            WorkflowError::AnalysisUnavailable { state, .. } => state,
        }
    }
}
