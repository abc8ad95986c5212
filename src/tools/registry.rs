use crate::types::{AppError, Result, ToolDefinition};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A callable capability exposed to the agents.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name as referenced by agents and models.
    fn name(&self) -> &str;
    /// One-line description for model-facing tool listings.
    fn description(&self) -> &str;
    /// JSON schema of the accepted arguments.
    fn parameters_schema(&self) -> Value;
    /// Run the tool with the given arguments.
    async fn execute(&self, args: Value) -> Result<Value>;
}

/// Registry of available tools, keyed by name.
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Create a registry with the invoice pipeline tools registered.
    pub fn with_default_tools() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(crate::tools::totals::ComputeTotalsTool));
        registry.register(Arc::new(crate::tools::pdf::GenerateInvoicePdfTool));
        registry
    }

    /// Register a tool under its own name.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Schemas of every registered tool, for model-facing listings.
    pub fn get_tool_definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .values()
            .map(|tool| ToolDefinition {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }

    /// Execute a registered tool by name.
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value> {
        if let Some(tool) = self.tools.get(name) {
            tracing::debug!(tool = name, "executing tool");
            tool.execute(args).await
        } else {
            Err(AppError::NotFound(format!("Tool not found: {}", name)))
        }
    }

    /// Names of all registered tools.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// Check if a tool is registered.
    pub fn has_tool(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_registry_creation() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tool_names().len(), 0);
    }

    #[test]
    fn test_registry_with_default_tools() {
        let registry = ToolRegistry::with_default_tools();
        assert_eq!(registry.tool_names().len(), 2);
        assert!(registry.has_tool("compute_totals"));
        assert!(registry.has_tool("generate_invoice_pdf"));
    }

    #[test]
    fn test_get_tool_definitions() {
        let registry = ToolRegistry::with_default_tools();
        let definitions = registry.get_tool_definitions();

        assert_eq!(definitions.len(), 2);
        for def in &definitions {
            assert!(!def.name.is_empty());
            assert!(!def.description.is_empty());
            assert!(def.parameters.is_object());
        }
    }

    #[tokio::test]
    async fn test_compute_totals_execution() {
        let registry = ToolRegistry::with_default_tools();

        let args = json!({
            "raw_json": r#"{"items":[{"description":"Service","unit_price":100,"quantity":2,"tax":0.05}]}"#
        });

        let result = registry.execute("compute_totals", args).await.unwrap();
        let payload: serde_json::Value =
            serde_json::from_str(result.as_str().unwrap()).unwrap();
        assert_eq!(payload["subtotal"], 200.0);
        assert_eq!(payload["tax"], 10.0);
        assert_eq!(payload["total"], 210.0);
    }

    #[tokio::test]
    async fn test_nonexistent_tool() {
        let registry = ToolRegistry::with_default_tools();
        let result = registry.execute("nonexistent_tool", json!({})).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
