use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============= Agent Types =============

/// The role an agent plays in the pipeline.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AgentType {
    /// Root agent driving the fixed extraction-then-render pipeline.
    Orchestrator,
    /// Maps free text into a structured invoice record.
    Extraction,
    /// Turns a structured record into a PDF document.
    Invoice,
}

/// Per-request context handed to every agent.
#[derive(Debug, Clone)]
pub struct AgentContext {
    /// User identifier.
    pub user_id: String,
    /// Session/conversation identifier.
    pub session_id: String,
    /// Recent conversation history.
    pub conversation_history: Vec<Message>,
}

impl AgentContext {
    /// Create a context with a fresh session id and empty history.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            session_id: uuid::Uuid::new_v4().to_string(),
            conversation_history: Vec::new(),
        }
    }
}

/// A single conversation message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub role: MessageRole,
    /// Message text.
    pub content: String,
    /// When the message was recorded.
    pub timestamp: DateTime<Utc>,
}

impl Message {
    /// Build a user message stamped with the current time.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// Build an assistant message stamped with the current time.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Message author role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instruction.
    System,
    /// End user input.
    User,
    /// Model output.
    Assistant,
}

// ============= Tool Types =============

/// Schema describing a tool to the model.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ToolDefinition {
    /// Tool name as exposed to the model.
    pub name: String,
    /// Human-readable tool description.
    pub description: String,
    /// JSON schema for the tool arguments.
    pub parameters: serde_json::Value,
}

// ============= Error Types =============

/// Crate-wide error taxonomy.
///
/// Malformed invoice data never surfaces here: the tool layer degrades to
/// defaults instead (see [`crate::invoice::totals`]). These variants cover
/// the failures that genuinely have no local recovery.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Model transport failure, including retry exhaustion.
    #[error("LLM error: {0}")]
    Llm(String),

    /// Caller passed arguments a tool cannot work with.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Unknown tool or missing resource.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Filesystem failure while writing the output document.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// PDF backend failure.
    #[error("Render error: {0}")]
    Render(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AppError>;
