use crate::types::Result;
use crate::utils::config::RetryOptions;
use async_trait::async_trait;

/// Generic LLM client trait for provider abstraction.
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate a completion from a prompt.
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Generate with a system instruction.
    async fn generate_with_system(&self, system: &str, prompt: &str) -> Result<String>;

    /// Model name/identifier.
    fn model_name(&self) -> &str;
}

/// Provider enum for runtime selection.
#[derive(Debug, Clone)]
pub enum Provider {
    /// Google Gemini REST API.
    Gemini {
        /// API key.
        api_key: String,
        /// Model identifier, e.g. `gemini-2.5-flash-lite`.
        model: String,
        /// Transport retry policy.
        retry: RetryOptions,
    },
}

impl Provider {
    /// Create a client instance for this provider.
    pub fn create_client(&self) -> Box<dyn LLMClient> {
        match self {
            Provider::Gemini {
                api_key,
                model,
                retry,
            } => Box::new(super::gemini::GeminiClient::new(
                api_key.clone(),
                model.clone(),
                retry.clone(),
            )),
        }
    }

    /// Human-readable provider name.
    pub fn name(&self) -> &'static str {
        match self {
            Provider::Gemini { .. } => "Gemini",
        }
    }
}
