use crate::agents::Agent;
use crate::tools::ToolRegistry;
use crate::types::{AgentContext, AgentType, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// Turns a structured invoice record into a PDF document.
///
/// Purely deterministic: the rendering step needs no model, only the
/// `generate_invoice_pdf` tool.
pub struct InvoiceAgent {
    tools: Arc<ToolRegistry>,
    output_file: Option<String>,
}

impl InvoiceAgent {
    /// Create an invoice agent writing to the default output path.
    pub fn new(tools: Arc<ToolRegistry>) -> Self {
        Self {
            tools,
            output_file: None,
        }
    }

    /// Create an invoice agent writing to a fixed output path.
    pub fn with_output_file(tools: Arc<ToolRegistry>, output_file: impl Into<String>) -> Self {
        Self {
            tools,
            output_file: Some(output_file.into()),
        }
    }
}

#[async_trait]
impl Agent for InvoiceAgent {
    async fn execute(&self, input: &str, _context: &AgentContext) -> Result<String> {
        let mut args = json!({ "raw_json": input });
        if let Some(file_name) = &self.output_file {
            args["file_name"] = Value::String(file_name.clone());
        }

        let result = self.tools.execute("generate_invoice_pdf", args).await?;

        match result {
            Value::String(path) => Ok(path),
            other => Ok(other.to_string()),
        }
    }

    fn system_prompt(&self) -> String {
        "You are an invoice generator assistant. Given structured invoice data \
         as a JSON string, generate the PDF and return the file path as a plain string."
            .to_string()
    }

    fn agent_type(&self) -> AgentType {
        AgentType::Invoice
    }
}
