//! Scout core: research and compare developer tools.
//!
//! A query flows through three fixed stages: extract candidate tool names
//! from comparison articles, research each tool's official site, then ask a
//! language model for a recommendation.

pub mod config;
pub mod llm;
pub mod pipeline;
pub mod research;
pub mod search;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use config::{Config, ConfigError, LLMConfig, PipelineConfig, SearchConfig};
pub use llm::{ClaudeClient, LLMError, OpenAIClient, Provider, LLM};
pub use pipeline::{ResearchWorkflow, Stage, WorkflowError};
pub use research::{CompanyAnalysis, CompanyInfo, DeveloperExperience, ResearchState, StateUpdate};
pub use search::{FirecrawlClient, SearchError, SearchProvider, SearchService};
