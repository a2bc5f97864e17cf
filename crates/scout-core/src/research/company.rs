use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pricing model reported when a site could not be analyzed.
pub const UNKNOWN_PRICING: &str = "Unknown";

/// Description reported when a site could not be analyzed.
pub const FAILED_ANALYSIS_DESCRIPTION: &str = "Failed to analyze content";

/// How pleasant a tool is to work with, as judged by the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DeveloperExperience {
    Poor,
    Good,
    Excellent,
}

impl DeveloperExperience {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeveloperExperience::Poor => "Poor",
            DeveloperExperience::Good => "Good",
            DeveloperExperience::Excellent => "Excellent",
        }
    }
}

/// Everything known about one researched tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyInfo {
    pub name: String,
    pub description: String,
    pub website: String,
    #[serde(default)]
    pub pricing_model: Option<String>,
    #[serde(default)]
    pub is_open_source: Option<bool>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub competitors: Vec<String>,
    #[serde(default)]
    pub api_available: Option<bool>,
    #[serde(default)]
    pub language_support: Vec<String>,
    #[serde(default)]
    pub integration_capabilities: Vec<String>,
    #[serde(default)]
    pub developer_experience_rating: Option<DeveloperExperience>,
}

impl CompanyInfo {
    /// A record built from the official-site search hit alone.
    pub fn provisional(
        name: impl Into<String>,
        website: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            website: website.into(),
            description: description.into(),
            ..Self::default()
        }
    }

    /// Copies the analyzed fields in. The analysis description replaces the
    /// provisional one.
    pub fn apply_analysis(&mut self, analysis: CompanyAnalysis) {
        self.pricing_model = Some(analysis.pricing_model);
        self.is_open_source = analysis.is_open_source;
        self.tech_stack = dedup_preserving_order(analysis.tech_stack);
        self.description = analysis.description;
        self.api_available = analysis.api_available;
        self.language_support = analysis.language_support;
        self.integration_capabilities = analysis.integration_capabilities;
    }
}

/// Structured analysis of a tool's website, produced by the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CompanyAnalysis {
    /// One of: Free, Freemium, Paid, Enterprise, Unknown.
    pub pricing_model: String,
    /// Whether the tool's source code is openly licensed.
    #[serde(default)]
    pub is_open_source: Option<bool>,
    /// Technologies the tool is built on or targets.
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// One-sentence description focused on what the tool does for developers.
    #[serde(default)]
    pub description: String,
    /// Whether the tool offers a REST, GraphQL or SDK API.
    #[serde(default)]
    pub api_available: Option<bool>,
    /// Programming languages the tool supports.
    #[serde(default)]
    pub language_support: Vec<String>,
    /// Tools and platforms it integrates with.
    #[serde(default)]
    pub integration_capabilities: Vec<String>,
}

impl CompanyAnalysis {
    /// The neutral record returned when analysis fails.
    pub fn failed() -> Self {
        Self {
            pricing_model: UNKNOWN_PRICING.to_string(),
            is_open_source: None,
            tech_stack: Vec::new(),
            description: FAILED_ANALYSIS_DESCRIPTION.to_string(),
            api_available: None,
            language_support: Vec::new(),
            integration_capabilities: Vec::new(),
        }
    }
}

// Tech stack is set-like.
fn dedup_preserving_order(items: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
