//! # Invoxa — agentic invoice generator
//!
//! Converts natural-language invoice requests into a generated single-page
//! PDF invoice. A language-model agent extracts structured data; a
//! deterministic tool layer normalizes it, computes totals, and renders the
//! document.
//!
//! ## Pipeline
//!
//! Two sequential stages under a fixed two-step orchestrator:
//!
//! 1. **Extraction** — free text → structured [`invoice::InvoiceRecord`]
//!    (legacy shapes normalized, aggregates recomputed).
//! 2. **Rendering** — structured record → fixed-layout PDF; result is the
//!    output file path.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use invoxa::{
//!     agents::{Agent, ExtractionAgent, InvoiceAgent, InvoiceGeneratorAgent},
//!     llm::Provider,
//!     memory::{InMemoryMemoryService, InMemorySessionService},
//!     tools::ToolRegistry,
//!     types::AgentContext,
//!     utils::config::Config,
//! };
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env();
//!     let provider = Provider::Gemini {
//!         api_key: config.gemini_api_key.clone().unwrap_or_default(),
//!         model: config.worker_model.clone(),
//!         retry: config.retry_options(),
//!     };
//!
//!     let tools = Arc::new(ToolRegistry::with_default_tools());
//!     let agent = InvoiceGeneratorAgent::new(
//!         ExtractionAgent::new(provider.create_client(), Arc::clone(&tools)),
//!         InvoiceAgent::new(Arc::clone(&tools)),
//!         Arc::new(InMemorySessionService::new()),
//!         Some(Arc::new(InMemoryMemoryService::new())),
//!     );
//!
//!     let path = agent
//!         .execute(
//!             "Invoice Acme Corp for two hours of consulting at $100/h, 5% tax",
//!             &AgentContext::new("user-1"),
//!         )
//!         .await?;
//!     println!("{}", path);
//!     Ok(())
//! }
//! ```
//!
//! ## Using the tool layer directly
//!
//! The two tools are the stable contract between orchestration and the core
//! and work without any model:
//!
//! ```rust,ignore
//! let totals = invoxa::invoice::compute_totals(r#"{"items":[...]}"#);
//! let path = invoxa::tools::pdf::generate_invoice_pdf(&totals, None)?;
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// Agent framework: extraction, rendering, and the root pipeline.
pub mod agents;
/// Invoice data model, normalization, and totals computation.
pub mod invoice;
/// LLM provider clients and abstractions.
pub mod llm;
/// In-memory session and memory services.
pub mod memory;
/// Fixed-layout PDF rendering.
pub mod render;
/// Tool definitions and registry.
pub mod tools;
/// Core types and error handling.
pub mod types;
/// Configuration utilities.
pub mod utils;

// Re-export commonly used types
pub use agents::{Agent, ExtractionAgent, InvoiceAgent, InvoiceGeneratorAgent};
pub use invoice::{compute_totals, InvoiceRecord, TotalsOutcome};
pub use llm::{GeminiClient, LLMClient, Provider};
pub use tools::ToolRegistry;
pub use types::{AgentContext, AppError, Result};
pub use utils::config::{Config, RetryOptions};
