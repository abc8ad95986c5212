//! The deterministic tool layer exposed to the agents.
//!
//! Two tools make up the stable contract between orchestration and this
//! crate's core, both string-in/string-out over the JSON transport form:
//!
//! - [`totals`] — `compute_totals(raw_json) -> String`: normalize, aggregate,
//!   or degrade to an error-annotated default record.
//! - [`pdf`] — `generate_invoice_pdf(raw_json, file_name?) -> String`: render
//!   the single-page document and return its path.
//!
//! The [`registry`] module manages discovery and execution:
//! ```ignore
//! let registry = ToolRegistry::with_default_tools();
//! let result = registry.execute("compute_totals", json!({"raw_json": payload})).await?;
//! ```

/// PDF generation tool.
pub mod pdf;
/// Tool registration and discovery.
pub mod registry;
/// Totals computation tool.
pub mod totals;

pub use registry::{Tool, ToolRegistry};
