//! Structured (schema-constrained) completions.

use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{LLMError, LLM};

/// A named JSON schema describing the shape a reply must take.
#[derive(Debug, Clone)]
pub struct OutputSchema {
    /// Schema name, restricted to `[A-Za-z0-9_-]` by OpenAI.
    pub name: String,
    /// The JSON schema document.
    pub schema: Value,
}

impl OutputSchema {
    /// Derives the schema for `T`.
    pub fn of<T: JsonSchema>() -> Self {
        let schema = schemars::schema_for!(T);
        Self {
            name: T::schema_name().to_string(),
            schema: serde_json::to_value(&schema).unwrap_or(Value::Null),
        }
    }

    /// Appends the JSON-only instruction and the schema to a system prompt.
    ///
    /// Used by providers without native structured output.
    pub fn append_to_system(&self, system: &str) -> String {
        let schema = serde_json::to_string_pretty(&self.schema).unwrap_or_default();
        format!(
            "{system}\n\nIMPORTANT: Output only valid JSON matching this JSON schema, no additional text:\n{schema}"
        )
    }
}

/// Runs a structured completion and deserializes the reply into `T`.
///
/// A reply that is not valid JSON for `T` is reported as
/// [`LLMError::ParseError`], the same way as any other provider failure.
pub async fn complete_structured<T, L>(llm: &L, system: &str, prompt: &str) -> Result<T, LLMError>
where
    T: JsonSchema + DeserializeOwned,
    L: LLM + ?Sized,
{
    let schema = OutputSchema::of::<T>();
    let response = llm.complete_json(system, prompt, &schema).await?;
    let json_str = extract_json(&response);

    serde_json::from_str(json_str).map_err(|e| {
        LLMError::ParseError(format!(
            "Reply does not match {}: {}. Response: {}",
            schema.name,
            e,
            json_str.chars().take(500).collect::<String>()
        ))
    })
}

/// Extracts JSON from a response that might be wrapped in markdown code blocks
/// or surrounded by prose.
pub fn extract_json(response: &str) -> &str {
    let trimmed = response.trim();

    // Check for ```json ... ``` or ``` ... ```
    if trimmed.starts_with("```") {
        if let Some(start) = trimmed.find('\n') {
            let rest = &trimmed[start + 1..];
            if let Some(end) = rest.rfind("```") {
                return rest[..end].trim();
            }
        }
    }

    if !trimmed.starts_with('{') {
        if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
            if start < end {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}
