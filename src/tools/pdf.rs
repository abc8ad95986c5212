use crate::invoice::record::InvoiceRecord;
use crate::render::render_invoice;
use crate::tools::registry::Tool;
use crate::types::{AppError, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory used when the caller supplies no file name.
pub const DEFAULT_OUTPUT_DIR: &str = "output";
/// File name used under [`DEFAULT_OUTPUT_DIR`]. Always the same, so repeated
/// default-path calls overwrite each other, last writer wins.
pub const DEFAULT_FILE_NAME: &str = "invoice.pdf";

/// Render a serialized invoice record to a PDF and return the output path.
///
/// Parse failure of the payload is absorbed into an empty record; filesystem
/// failures are the one thing that propagates, since an unwritable output
/// target has no local recovery.
pub fn generate_invoice_pdf(raw_json: &str, file_name: Option<&str>) -> Result<String> {
    let path: PathBuf = match file_name {
        Some(name) => PathBuf::from(name),
        None => {
            let dir = Path::new(DEFAULT_OUTPUT_DIR);
            fs::create_dir_all(dir)?;
            dir.join(DEFAULT_FILE_NAME)
        }
    };

    let record: InvoiceRecord = serde_json::from_str(raw_json).unwrap_or_default();
    render_invoice(&record, &path)?;
    Ok(path.to_string_lossy().into_owned())
}

/// Tool wrapper around [`generate_invoice_pdf`].
pub struct GenerateInvoicePdfTool;

#[async_trait]
impl Tool for GenerateInvoicePdfTool {
    fn name(&self) -> &str {
        "generate_invoice_pdf"
    }

    fn description(&self) -> &str {
        "Render a structured invoice record as a single-page PDF and return the file path"
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "raw_json": {
                    "type": "string",
                    "description": "Invoice record as a JSON string"
                },
                "file_name": {
                    "type": "string",
                    "description": "Optional output path; defaults to output/invoice.pdf"
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
        let file_name = args.get("file_name").and_then(|v| v.as_str());

        let path = generate_invoice_pdf(raw_json, file_name)?;
        Ok(Value::String(path))
    }
}
