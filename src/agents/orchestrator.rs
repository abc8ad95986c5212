use crate::agents::{Agent, ExtractionAgent, InvoiceAgent};
use crate::memory::{spawn_auto_save, InMemoryMemoryService, InMemorySessionService};
use crate::types::{AgentContext, AgentType, Message, Result};
use async_trait::async_trait;
use std::sync::Arc;

/// Root agent driving the fixed two-step pipeline.
///
/// Extraction first, rendering second, the PDF path back to the caller. No
/// feedback loops and no branching: the only recovery in the pipeline lives
/// inside the tool layer. After the response completes, the interaction is
/// recorded into the session and saved to memory best-effort.
pub struct InvoiceGeneratorAgent {
    extraction: ExtractionAgent,
    invoice: InvoiceAgent,
    sessions: Arc<InMemorySessionService>,
    memory: Option<Arc<InMemoryMemoryService>>,
}

impl InvoiceGeneratorAgent {
    /// Assemble the pipeline from its two stages and the session services.
    ///
    /// Pass `None` for `memory` to disable interaction recording; the save is
    /// then skipped silently.
    pub fn new(
        extraction: ExtractionAgent,
        invoice: InvoiceAgent,
        sessions: Arc<InMemorySessionService>,
        memory: Option<Arc<InMemoryMemoryService>>,
    ) -> Self {
        Self {
            extraction,
            invoice,
            sessions,
            memory,
        }
    }

    fn record_interaction(&self, context: &AgentContext, input: &str, response: &str) {
        self.sessions
            .append_event(&context.session_id, &context.user_id, Message::user(input));
        self.sessions.append_event(
            &context.session_id,
            &context.user_id,
            Message::assistant(response),
        );

        if let Some(memory) = &self.memory {
            if let Some(session) = self.sessions.get(&context.session_id) {
                spawn_auto_save(Arc::clone(memory), session);
            }
        }
    }
}

#[async_trait]
impl Agent for InvoiceGeneratorAgent {
    async fn execute(&self, input: &str, context: &AgentContext) -> Result<String> {
        tracing::info!(session = %context.session_id, "starting invoice pipeline");

        let structured = self.extraction.execute(input, context).await?;
        let path = self.invoice.execute(&structured, context).await?;

        self.record_interaction(context, input, &path);

        tracing::info!(session = %context.session_id, path = %path, "invoice pipeline finished");
        Ok(path)
    }

    fn system_prompt(&self) -> String {
        "You are the orchestrator.\n\
         1. When a user provides invoice details in natural language, first run the extraction step.\n\
         2. Then hand the JSON string result to the invoice step.\n\
         3. Return the final PDF file path to the user as a plain string."
            .to_string()
    }

    fn agent_type(&self) -> AgentType {
        AgentType::Orchestrator
    }
}
