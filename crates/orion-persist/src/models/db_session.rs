use orion_types::RecordId;
use serde::{Deserialize, Serialize};

/// Row of the `chat_sessions` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: RecordId,
    pub user_id: RecordId,
}

impl Session {
    pub fn new(id: impl Into<RecordId>, user_id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
        }
    }
}
