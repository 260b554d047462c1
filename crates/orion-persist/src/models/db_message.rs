use chrono::{DateTime, Utc};
use orion_types::{RecordId, TranscriptEntry};
use serde::{Deserialize, Serialize};

pub use orion_types::Role as MessageRole;

/// Database-agnostic message model
///
/// Messages are append-only; ordering is insertion order within a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DBMessage {
    pub session_id: RecordId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl DBMessage {
    pub fn new(session_id: RecordId, role: MessageRole, content: impl Into<String>) -> Self {
        Self {
            session_id,
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(session_id: RecordId, content: impl Into<String>) -> Self {
        Self::new(session_id, MessageRole::User, content)
    }

    pub fn assistant(session_id: RecordId, content: impl Into<String>) -> Self {
        Self::new(session_id, MessageRole::Assistant, content)
    }
}

impl From<DBMessage> for TranscriptEntry {
    fn from(msg: DBMessage) -> Self {
        Self {
            session_id: msg.session_id,
            role: msg.role,
            content: msg.content,
            created_at: msg.created_at,
        }
    }
}
