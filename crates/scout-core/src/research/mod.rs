mod company;
pub mod prompts;
mod report;
mod state;

pub use company::{
    CompanyAnalysis, CompanyInfo, DeveloperExperience, FAILED_ANALYSIS_DESCRIPTION,
    UNKNOWN_PRICING,
};
pub use state::{ResearchState, StageFailure, StateUpdate};
