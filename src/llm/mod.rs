//! LLM client abstraction and the Gemini provider.
//!
//! The pipeline only needs request/response generation; streaming and tool
//! calling happen model-side. Retries against the API are transport
//! configuration ([`crate::utils::config::RetryOptions`]), applied inside the
//! client, never in the pipeline.

/// Client trait and provider selection.
pub mod client;
/// Gemini REST API client.
pub mod gemini;

pub use client::{LLMClient, Provider};
pub use gemini::GeminiClient;
