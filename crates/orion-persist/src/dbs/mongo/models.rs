use chrono::{DateTime, Utc};
use bson::{oid::ObjectId, Bson};
use orion_types::RecordId;
use serde::{Deserialize, Serialize};

use crate::models::{DBMessage, MessageRole};

/// MongoDB-specific Message model (uses ObjectId)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MongoMessage {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub session_id: RecordId,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

pub fn id_to_bson(id: &RecordId) -> Bson {
    match id {
        RecordId::Int(n) => Bson::Int64(*n),
        RecordId::Text(s) => Bson::String(s.clone()),
    }
}

// Conversions between database-agnostic and MongoDB-specific models

impl From<DBMessage> for MongoMessage {
    fn from(msg: DBMessage) -> Self {
        Self {
            id: ObjectId::new(),
            session_id: msg.session_id,
            role: msg.role,
            content: msg.content,
            created_at: msg.created_at,
        }
    }
}

impl From<MongoMessage> for DBMessage {
    fn from(msg: MongoMessage) -> Self {
        Self {
            session_id: msg.session_id,
            role: msg.role,
            content: msg.content,
            created_at: msg.created_at,
        }
    }
}
