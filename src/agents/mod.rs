//! The agent layer: one extraction stage, one rendering stage, and the root
//! orchestrator that runs them as a fixed two-step pipeline.

/// Free text to structured record with computed totals.
pub mod extraction;
/// Structured record to PDF document.
pub mod invoice;
/// Root two-step pipeline.
pub mod orchestrator;

use crate::types::{AgentContext, AgentType, Result};
use async_trait::async_trait;

pub use extraction::ExtractionAgent;
pub use invoice::InvoiceAgent;
pub use orchestrator::InvoiceGeneratorAgent;

/// Base trait for all agents.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Execute the agent with given input and context.
    async fn execute(&self, input: &str, context: &AgentContext) -> Result<String>;

    /// The agent's system prompt.
    fn system_prompt(&self) -> String;

    /// The agent type.
    fn agent_type(&self) -> AgentType;
}
