//! In-memory session and memory services.
//!
//! Sessions group the messages of one interaction; the memory service keeps a
//! per-user log of completed interactions. Recording into memory is a
//! best-effort side effect with its own failure domain: the pipeline fires it
//! after the response completes and never waits on it, and a failure is
//! logged and swallowed.

use crate::types::{Message, Result};
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// One conversation, identified by session id.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier.
    pub id: String,
    /// Owning user.
    pub user_id: String,
    /// Messages in arrival order.
    pub events: Vec<Message>,
}

/// In-memory session store. No persistence across process restarts.
#[derive(Default)]
pub struct InMemorySessionService {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionService {
    /// Create an empty session store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to a session, creating the session on first use.
    pub fn append_event(&self, session_id: &str, user_id: &str, message: Message) {
        let mut sessions = self.sessions.write();
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session {
                id: session_id.to_string(),
                user_id: user_id.to_string(),
                events: Vec::new(),
            });
        session.events.push(message);
    }

    /// Fetch a session by id.
    pub fn get(&self, session_id: &str) -> Option<Session> {
        self.sessions.read().get(session_id).cloned()
    }
}

/// One remembered fragment of a past interaction.
#[derive(Debug, Clone)]
pub struct MemoryEntry {
    /// Owning user.
    pub user_id: String,
    /// Session the fragment came from.
    pub session_id: String,
    /// Message text.
    pub content: String,
    /// When the fragment was recorded.
    pub created_at: DateTime<Utc>,
}

/// In-memory per-user memory store.
#[derive(Default)]
pub struct InMemoryMemoryService {
    entries: RwLock<HashMap<String, Vec<MemoryEntry>>>,
}

impl InMemoryMemoryService {
    /// Create an empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record every message of a completed session into the user's memory.
    pub fn add_session_to_memory(&self, session: &Session) -> Result<()> {
        let now = Utc::now();
        let mut entries = self.entries.write();
        let user_entries = entries.entry(session.user_id.clone()).or_default();
        for event in &session.events {
            user_entries.push(MemoryEntry {
                user_id: session.user_id.clone(),
                session_id: session.id.clone(),
                content: event.content.clone(),
                created_at: now,
            });
        }
        tracing::debug!(
            session = %session.id,
            events = session.events.len(),
            "session recorded to memory"
        );
        Ok(())
    }

    /// All remembered entries for a user.
    pub fn entries_for_user(&self, user_id: &str) -> Vec<MemoryEntry> {
        self.entries
            .read()
            .get(user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Case-insensitive substring search over a user's memory.
    pub fn search(&self, user_id: &str, query: &str) -> Vec<MemoryEntry> {
        let needle = query.to_lowercase();
        self.entries_for_user(user_id)
            .into_iter()
            .filter(|e| e.content.to_lowercase().contains(&needle))
            .collect()
    }
}

/// Fire-and-forget save of a completed session into memory.
///
/// Returns the task handle so tests can await completion; production callers
/// drop it. A failed save is logged and otherwise ignored.
pub fn spawn_auto_save(
    memory: Arc<InMemoryMemoryService>,
    session: Session,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = memory.add_session_to_memory(&session) {
            tracing::warn!(error = %e, session = %session.id, "memory save failed, skipping");
        }
    })
}
