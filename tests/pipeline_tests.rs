//! End-to-end pipeline tests with a mocked model.
//!
//! These exercise the full path from natural-language input to a PDF on
//! disk: extraction (mock model output through `compute_totals`), rendering,
//! session recording, and the best-effort memory save.

use async_trait::async_trait;
use invoxa::agents::{Agent, ExtractionAgent, InvoiceAgent, InvoiceGeneratorAgent};
use invoxa::llm::LLMClient;
use invoxa::memory::{InMemoryMemoryService, InMemorySessionService};
use invoxa::tools::pdf::generate_invoice_pdf;
use invoxa::tools::ToolRegistry;
use invoxa::types::AgentContext;
use invoxa::{compute_totals, Result};
use std::sync::Arc;
use std::time::Duration;

struct MockLLM {
    reply: String,
}

#[async_trait]
impl LLMClient for MockLLM {
    async fn generate(&self, _: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
    async fn generate_with_system(&self, _: &str, _: &str) -> Result<String> {
        Ok(self.reply.clone())
    }
    fn model_name(&self) -> &str {
        "mock"
    }
}

const FENCED_EXTRACTION: &str = "```json\n{\
\"vendor_info\":{\"name\":\"Acme Corp\",\"email\":\"billing@acme.test\"},\
\"customer_info\":{\"name\":\"Jo Client\"},\
\"invoice_info\":{\"invoice_date\":\"2026-08-01\",\"due_date\":\"2026-09-01\"},\
\"invoice_number\":\"INV-42\",\
\"items\":[{\"description\":\"Service\",\"unit_price\":100,\"quantity\":2,\"tax\":0.05}]\
}\n```";

fn pipeline(reply: &str, output_file: &str, memory: Option<Arc<InMemoryMemoryService>>) -> (InvoiceGeneratorAgent, Arc<InMemorySessionService>) {
    let tools = Arc::new(ToolRegistry::with_default_tools());
    let sessions = Arc::new(InMemorySessionService::new());
    let agent = InvoiceGeneratorAgent::new(
        ExtractionAgent::new(
            Box::new(MockLLM {
                reply: reply.to_string(),
            }),
            Arc::clone(&tools),
        ),
        InvoiceAgent::with_output_file(Arc::clone(&tools), output_file),
        Arc::clone(&sessions),
        memory,
    );
    (agent, sessions)
}

#[test]
fn test_tool_chain_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("invoice.pdf");

    let totals = compute_totals(
        r#"{"items":[{"description":"Service","unit_price":100,"quantity":2,"tax":0.05}]}"#,
    );
    let record: serde_json::Value = serde_json::from_str(&totals).unwrap();
    assert_eq!(record["subtotal"], 200.0);
    assert_eq!(record["tax"], 10.0);
    assert_eq!(record["total"], 210.0);

    let path = generate_invoice_pdf(&totals, Some(target.to_str().unwrap())).unwrap();
    assert_eq!(path, target.to_string_lossy());
    assert!(std::fs::read(&target).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_pipeline_produces_pdf_and_records_session() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("invoice.pdf");
    let memory = Arc::new(InMemoryMemoryService::new());
    let (agent, sessions) = pipeline(
        FENCED_EXTRACTION,
        target.to_str().unwrap(),
        Some(Arc::clone(&memory)),
    );

    let context = AgentContext::new("user-1");
    let path = agent
        .execute("Invoice Acme Corp for two hours of service at $100, 5% tax", &context)
        .await
        .unwrap();

    assert_eq!(path, target.to_string_lossy());
    assert!(std::fs::read(&target).unwrap().starts_with(b"%PDF"));

    let session = sessions.get(&context.session_id).unwrap();
    assert_eq!(session.events.len(), 2);
    assert_eq!(session.events[1].content, path);

    // The memory save is fire-and-forget; give the spawned task a moment.
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(memory.entries_for_user("user-1").len(), 2);
}

#[tokio::test]
async fn test_pipeline_without_memory_service() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("invoice.pdf");
    let (agent, sessions) = pipeline(FENCED_EXTRACTION, target.to_str().unwrap(), None);

    let context = AgentContext::new("user-2");
    let path = agent.execute("same request", &context).await.unwrap();

    assert!(std::path::Path::new(&path).exists());
    assert!(sessions.get(&context.session_id).is_some());
}

#[tokio::test]
async fn test_pipeline_survives_model_gibberish() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("degraded.pdf");
    let (agent, _) = pipeline("no JSON here, sorry", target.to_str().unwrap(), None);

    // Extraction degrades to the default record; rendering still succeeds.
    let path = agent
        .execute("gibberish in, degraded invoice out", &AgentContext::new("user-3"))
        .await
        .unwrap();

    assert!(std::fs::read(&path).unwrap().starts_with(b"%PDF"));
}

#[tokio::test]
async fn test_pipeline_overwrites_same_target() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("invoice.pdf");

    let (first, _) = pipeline(FENCED_EXTRACTION, target.to_str().unwrap(), None);
    first.execute("first", &AgentContext::new("u")).await.unwrap();
    let first_bytes = std::fs::read(&target).unwrap();

    let second_reply = "```json\n{\"invoice_number\":\"INV-43\",\"items\":[{\"description\":\"Another line entirely\",\"unit_price\":7,\"quantity\":11,\"tax\":0.2}]}\n```";
    let (second, _) = pipeline(second_reply, target.to_str().unwrap(), None);
    second.execute("second", &AgentContext::new("u")).await.unwrap();
    let second_bytes = std::fs::read(&target).unwrap();

    assert_ne!(first_bytes, second_bytes);
}
