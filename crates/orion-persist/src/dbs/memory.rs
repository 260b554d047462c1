use async_trait::async_trait;
use orion_types::RecordId;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{DBMessage, Session, User};
use crate::trait_client::PersistenceClient;

#[derive(Default)]
struct Tables {
    users: HashMap<RecordId, User>,
    sessions: HashMap<RecordId, Session>,
    messages: Vec<DBMessage>,
}

/// Process-local store, used for development and tests
#[derive(Default)]
pub struct InMemoryPersistenceClient {
    tables: RwLock<Tables>,
}

impl InMemoryPersistenceClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn user(&self, id: &RecordId) -> Option<User> {
        self.tables.read().await.users.get(id).cloned()
    }

    pub async fn session(&self, id: &RecordId) -> Option<Session> {
        self.tables.read().await.sessions.get(id).cloned()
    }

    /// Messages across every session, in insertion order
    pub async fn all_messages(&self) -> Vec<DBMessage> {
        self.tables.read().await.messages.clone()
    }
}

#[async_trait]
impl PersistenceClient for InMemoryPersistenceClient {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn upsert_user(&self, user: &User) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .users
            .entry(user.id.clone())
            .or_insert_with(|| user.clone());
        Ok(())
    }

    async fn upsert_session(&self, session: &Session) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .sessions
            .entry(session.id.clone())
            .or_insert_with(|| session.clone());
        Ok(())
    }

    async fn save_message(&self, message: DBMessage) -> Result<()> {
        self.tables.write().await.messages.push(message);
        Ok(())
    }

    async fn get_messages(&self, session_id: &RecordId) -> Result<Vec<DBMessage>> {
        let tables = self.tables.read().await;
        Ok(tables
            .messages
            .iter()
            .filter(|m| &m.session_id == session_id)
            .cloned()
            .collect())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
