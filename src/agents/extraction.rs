use crate::agents::Agent;
use crate::llm::LLMClient;
use crate::tools::ToolRegistry;
use crate::types::{AgentContext, AgentType, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

const EXTRACTION_PROMPT: &str = r#"You are a smart data extraction assistant.

1. Parse user input into structured JSON invoice data.
2. Always include the following fields:
   - vendor_info: {name, phone, address, email}
   - customer_info: {name, phone, address, email}
   - invoice_info: {invoice_date, due_date}
   - invoice_number
   - items: [{description, unit_price, quantity, tax}]
3. Return the final JSON inside a single code block.
Dates must be ISO format (yyyy-mm-dd)."#;

/// Maps free-text invoice descriptions into a structured record.
///
/// The model produces candidate JSON; `compute_totals` then normalizes it and
/// fills the aggregates deterministically, so the model is never trusted with
/// arithmetic.
pub struct ExtractionAgent {
    llm: Box<dyn LLMClient>,
    tools: Arc<ToolRegistry>,
}

impl ExtractionAgent {
    /// Create an extraction agent over the given model and tool registry.
    pub fn new(llm: Box<dyn LLMClient>, tools: Arc<ToolRegistry>) -> Self {
        Self { llm, tools }
    }
}

#[async_trait]
impl Agent for ExtractionAgent {
    async fn execute(&self, input: &str, _context: &AgentContext) -> Result<String> {
        let candidate = self
            .llm
            .generate_with_system(&self.system_prompt(), input)
            .await?;

        let result = self
            .tools
            .execute("compute_totals", json!({ "raw_json": candidate }))
            .await?;

        match result {
            Value::String(payload) => Ok(payload),
            other => Ok(other.to_string()),
        }
    }

    fn system_prompt(&self) -> String {
        EXTRACTION_PROMPT.to_string()
    }

    fn agent_type(&self) -> AgentType {
        AgentType::Extraction
    }
}
