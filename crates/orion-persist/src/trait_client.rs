use async_trait::async_trait;
use orion_types::RecordId;

use crate::error::Result;
use crate::models::{DBMessage, Session, User};

/// Trait for conversation store operations
///
/// Upserts only ensure a row exists: calling them again with the same id
/// succeeds and leaves the stored row untouched. Messages are append-only.
#[async_trait]
pub trait PersistenceClient: Send + Sync {
    /// Short backend name used in logs and health output
    fn backend_name(&self) -> &'static str;

    /// Ensure a user row exists
    async fn upsert_user(&self, user: &User) -> Result<()>;

    /// Ensure a session row exists
    async fn upsert_session(&self, session: &Session) -> Result<()>;

    /// Append a single message
    async fn save_message(&self, message: DBMessage) -> Result<()>;

    /// All messages of a session, oldest first
    async fn get_messages(&self, session_id: &RecordId) -> Result<Vec<DBMessage>>;

    /// Cheap connectivity check
    async fn ping(&self) -> Result<()>;
}
