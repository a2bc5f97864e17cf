/// System prompt for pulling tool names out of comparison articles.
pub const TOOL_EXTRACTION_SYSTEM: &str = r#"You are a tech researcher. Extract specific tool, library, platform, or service names from articles.

Focus on actual products and tools developers can use, not general concepts or features.

Return just the tool names, one per line, no descriptions, no numbering, no extra text."#;

/// Builds the user prompt for tool extraction.
pub fn tool_extraction_user(query: &str, content: &str) -> String {
    format!(
        r#"## Query

{query}

## Article Content

{content}

Extract a list of specific tool/service names mentioned in this content that are relevant to "{query}".

Rules:
- Only include actual product names, not generic terms
- Focus on tools developers can directly use or implement
- Include both open source and commercial options
- Limit to the 5 most relevant results
- Return just the tool names, one per line, no descriptions

Example format:
Supabase
PlanetScale
Railway
Appwrite
Nhost"#
    )
}

/// System prompt for analyzing a tool's official site.
pub const TOOL_ANALYSIS_SYSTEM: &str = r#"You are analyzing developer tools and programming technologies.

Focus on extracting information relevant to programmers and software developers.
Pay special attention to programming languages, frameworks, APIs, SDKs, and development workflows."#;

/// Builds the user prompt for analyzing one tool's site content.
pub fn tool_analysis_user(company_name: &str, content: &str) -> String {
    let content: String = content.chars().take(2500).collect();
    format!(
        r#"## Company/Tool

{company_name}

## Website Content

{content}

Analyze this content from a developer's perspective and provide:
- pricing_model: One of "Free", "Freemium", "Paid", "Enterprise", or "Unknown"
- is_open_source: true if open source, false if proprietary, null if unclear
- tech_stack: List of programming languages, frameworks, databases, APIs, or technologies supported/used
- description: Brief 1-sentence description focusing on what this tool does for developers
- api_available: true if REST API, GraphQL, SDK, or programmatic access is mentioned
- language_support: List of programming languages explicitly supported (e.g., Python, JavaScript, Go)
- integration_capabilities: List of tools/platforms it integrates with (e.g., GitHub, VS Code, Docker, AWS)

Focus on developer-relevant features like APIs, SDKs, language support, integrations, and development workflows."#
    )
}

/// System prompt for the final comparison.
pub const RECOMMENDATIONS_SYSTEM: &str = r#"You are a senior software engineer providing quick, concise tech recommendations.

Keep responses brief and actionable - 3-4 sentences max. No long explanations."#;

/// Builds the user prompt for the final comparison.
pub fn recommendations_user(query: &str, company_data: &str) -> String {
    format!(
        r#"## Developer Query

{query}

## Tools Analyzed

{company_data}

Provide a brief recommendation (3-4 sentences max) covering:
- Which tool is best and why
- Key cost/pricing consideration
- Main technical advantage

Be concise and direct - no long explanations needed."#
    )
}
