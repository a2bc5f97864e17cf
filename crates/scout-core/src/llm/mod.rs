mod error;
mod claude;
mod openai;
mod provider;
mod structured;

pub use error::LLMError;
pub use claude::ClaudeClient;
pub use openai::OpenAIClient;
pub use provider::Provider;
pub use structured::{complete_structured, extract_json, OutputSchema};

use async_trait::async_trait;

/// A language model the pipeline can ask questions.
///
/// Every call is a single system-then-user exchange; no conversation state
/// is kept between calls. Implemented by [`OpenAIClient`] (OpenAI, Ollama,
/// OpenRouter and other compatible servers) and [`ClaudeClient`].
///
/// ```ignore
/// use scout_core::llm::{Provider, LLM};
///
/// let llm = Provider::build_from_config(&config.llm)?;
/// let tools = llm.complete_with_system(TOOL_EXTRACTION_SYSTEM, &prompt).await?;
/// ```
#[async_trait]
pub trait LLM: Send + Sync {
    /// Sends a bare user prompt.
    async fn complete(&self, prompt: &str) -> Result<String, LLMError>;

    /// Sends a prompt under a system message and returns the reply text.
    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, LLMError>;

    /// Complete a prompt whose reply must be JSON conforming to `schema`.
    ///
    /// Returns the raw reply text. Default implementation embeds the schema
    /// in the system message; providers with native structured output
    /// override it.
    async fn complete_json(
        &self,
        system: &str,
        prompt: &str,
        schema: &OutputSchema,
    ) -> Result<String, LLMError> {
        let system = schema.append_to_system(system);
        self.complete_with_system(&system, prompt).await
    }
}

/// Lets a client chosen at runtime drive the generic pipeline.
#[async_trait]
impl LLM for Box<dyn LLM> {
    async fn complete(&self, prompt: &str) -> Result<String, LLMError> {
        (**self).complete(prompt).await
    }

    async fn complete_with_system(
        &self,
        system: &str,
        prompt: &str,
    ) -> Result<String, LLMError> {
        (**self).complete_with_system(system, prompt).await
    }

    async fn complete_json(
        &self,
        system: &str,
        prompt: &str,
        schema: &OutputSchema,
    ) -> Result<String, LLMError> {
        (**self).complete_json(system, prompt, schema).await
    }
}
