use crate::invoice::totals::compute_totals;
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};

/// Tool wrapper around [`compute_totals`].
///
/// Never fails on malformed invoice data: the result is then the serialized
/// degraded record with an `error` field, and the calling model decides what
/// to do with it.
pub struct ComputeTotalsTool;

#[async_trait]
impl Tool for ComputeTotalsTool {
    fn name(&self) -> &str {
        "compute_totals"
    }

    fn description(&self) -> &str {
        "Normalize an invoice JSON payload and compute subtotal, tax and total"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "raw_json": {
                    "type": "string",
                    "description": "Invoice record as a JSON string, optionally wrapped in a markdown code fence"
                }
            },
            "required": ["raw_json"]
        })
    }

    async fn execute(&self, args: Value) -> Result<Value> {
        let raw_json = args
            .get("raw_json")
            .and_then(|v| v.as_str())
            .ok_or_else(|| AppError::InvalidInput("Missing 'raw_json' parameter".to_string()))?;

        Ok(Value::String(compute_totals(raw_json)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definition() {
        let tool = ComputeTotalsTool;
        assert_eq!(tool.name(), "compute_totals");
        assert!(!tool.description().is_empty());

        let schema = tool.parameters_schema();
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["raw_json"].is_object());
    }

    #[tokio::test]
    async fn test_missing_raw_json() {
        let result = ComputeTotalsTool.execute(json!({})).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_malformed_payload_still_succeeds() {
        let result = ComputeTotalsTool
            .execute(json!({"raw_json": "not json"}))
            .await
            .unwrap();
        let payload: Value = serde_json::from_str(result.as_str().unwrap()).unwrap();
        assert_eq!(payload["invoice_number"], "N/A");
        assert!(payload["error"].is_string());
    }
}
