use async_trait::async_trait;
use futures::TryStreamExt;
use bson::{doc, Document};
use mongodb::{Client, Collection, Database};
use orion_types::RecordId;

use crate::dbs::mongo::models::{id_to_bson, MongoMessage};
use crate::error::{PersistError, Result};
use crate::models::{DBMessage, Session, User};
use crate::trait_client::PersistenceClient;

pub struct MongoPersistenceClient {
    database: Database,
    users: Collection<Document>,
    sessions: Collection<Document>,
    messages: Collection<MongoMessage>,
}

impl MongoPersistenceClient {
    /// Connect to MongoDB and create client
    pub async fn connect(mongodb_uri: &str, database: &str) -> Result<Self> {
        let client = Client::with_uri_str(mongodb_uri)
            .await
            .map_err(|e| PersistError::Connection(e.to_string()))?;

        let database = client.database(database);
        Ok(Self {
            users: database.collection("users"),
            sessions: database.collection("chat_sessions"),
            messages: database.collection("messages"),
            database,
        })
    }
}

#[async_trait]
impl PersistenceClient for MongoPersistenceClient {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn upsert_user(&self, user: &User) -> Result<()> {
        self.users
            .update_one(
                doc! { "_id": id_to_bson(&user.id) },
                doc! { "$setOnInsert": { "name": user.name.as_str() } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn upsert_session(&self, session: &Session) -> Result<()> {
        self.sessions
            .update_one(
                doc! { "_id": id_to_bson(&session.id) },
                doc! { "$setOnInsert": { "user_id": id_to_bson(&session.user_id) } },
            )
            .upsert(true)
            .await?;
        Ok(())
    }

    async fn save_message(&self, message: DBMessage) -> Result<()> {
        let mongo_message: MongoMessage = message.into();
        self.messages.insert_one(&mongo_message).await?;
        Ok(())
    }

    async fn get_messages(&self, session_id: &RecordId) -> Result<Vec<DBMessage>> {
        let filter = doc! { "session_id": id_to_bson(session_id) };
        let messages: Vec<MongoMessage> = self
            .messages
            .find(filter)
            .sort(doc! { "created_at": 1, "_id": 1 })
            .await?
            .try_collect()
            .await?;
        Ok(messages.into_iter().map(Into::into).collect())
    }

    async fn ping(&self) -> Result<()> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
