use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use orion_types::RecordId;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};

use crate::error::{PersistError, Result};
use crate::models::{DBMessage, MessageRole, Session, User};
use crate::trait_client::PersistenceClient;

pub const USERS_TABLE: &str = "users";
pub const SESSIONS_TABLE: &str = "chat_sessions";
pub const MESSAGES_TABLE: &str = "messages";

/// `ON CONFLICT DO NOTHING`: an existing row wins
const PREFER_ENSURE_EXISTS: &str = "resolution=ignore-duplicates,return=minimal";
const PREFER_APPEND: &str = "return=minimal";

/// Supabase store, spoken to through its PostgREST endpoint (`/rest/v1`)
pub struct PostgrestPersistenceClient {
    http_client: reqwest::Client,
    rest_url: String,
}

#[derive(Serialize)]
struct NewMessageRow<'a> {
    session_id: &'a RecordId,
    role: MessageRole,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessageRow {
    session_id: RecordId,
    role: MessageRole,
    content: String,
    created_at: String,
}

impl PostgrestPersistenceClient {
    /// `supabase_url` is the project URL, e.g. `https://xyz.supabase.co`
    pub fn new(supabase_url: impl Into<String>, service_key: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "apikey",
            HeaderValue::from_str(service_key)
                .map_err(|e| PersistError::Connection(format!("Invalid service key: {}", e)))?,
        );
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", service_key))
                .map_err(|e| PersistError::Connection(format!("Invalid service key: {}", e)))?,
        );

        let http_client = reqwest::Client::builder().default_headers(headers).build()?;

        let supabase_url = supabase_url.into();
        Ok(Self {
            http_client,
            rest_url: format!("{}/rest/v1", supabase_url.trim_end_matches('/')),
        })
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/{}", self.rest_url, table)
    }

    async fn insert<T: Serialize + ?Sized>(
        &self,
        table: &'static str,
        rows: &T,
        prefer: &'static str,
    ) -> Result<()> {
        let response = self
            .http_client
            .post(self.table_url(table))
            .header("Prefer", prefer)
            .json(rows)
            .send()
            .await?;

        Self::check(table, response).await?;
        Ok(())
    }

    async fn check(table: &'static str, response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(PersistError::Status {
            table,
            status,
            body,
        })
    }
}

/// PostgREST renders `timestamptz` as RFC 3339 and plain `timestamp`
/// without an offset; the latter is read as UTC.
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|e| {
            PersistError::Internal(format!("Unreadable created_at {:?} from store: {}", raw, e))
        })
}

#[async_trait]
impl PersistenceClient for PostgrestPersistenceClient {
    fn backend_name(&self) -> &'static str {
        "postgrest"
    }

    async fn upsert_user(&self, user: &User) -> Result<()> {
        self.insert(USERS_TABLE, &[user], PREFER_ENSURE_EXISTS).await
    }

    async fn upsert_session(&self, session: &Session) -> Result<()> {
        self.insert(SESSIONS_TABLE, &[session], PREFER_ENSURE_EXISTS)
            .await
    }

    async fn save_message(&self, message: DBMessage) -> Result<()> {
        let row = NewMessageRow {
            session_id: &message.session_id,
            role: message.role,
            content: &message.content,
        };
        self.insert(MESSAGES_TABLE, &[row], PREFER_APPEND).await
    }

    async fn get_messages(&self, session_id: &RecordId) -> Result<Vec<DBMessage>> {
        let response = self
            .http_client
            .get(self.table_url(MESSAGES_TABLE))
            .query(&[
                ("select", "session_id,role,content,created_at".to_string()),
                ("session_id", format!("eq.{}", session_id)),
                // Rows written in the same instant keep insertion order
                ("order", "created_at.asc,id.asc".to_string()),
            ])
            .send()
            .await?;

        let rows: Vec<MessageRow> = Self::check(MESSAGES_TABLE, response).await?.json().await?;

        rows.into_iter()
            .map(|row| {
                Ok(DBMessage {
                    created_at: parse_timestamp(&row.created_at)?,
                    session_id: row.session_id,
                    role: row.role,
                    content: row.content,
                })
            })
            .collect()
    }

    async fn ping(&self) -> Result<()> {
        let response = self
            .http_client
            .get(self.table_url(USERS_TABLE))
            .query(&[("select", "id"), ("limit", "1")])
            .send()
            .await?;
        Self::check(USERS_TABLE, response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_rest_url_from_project_url() {
        let client = PostgrestPersistenceClient::new("https://abc.supabase.co/", "key").unwrap();
        assert_eq!(client.rest_url(), "https://abc.supabase.co/rest/v1");
    }

    #[test]
    fn test_parse_timestamp_with_offset() {
        let ts = parse_timestamp("2024-05-01T12:00:00.5+02:00").unwrap();
        let expected = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap()
            + chrono::Duration::milliseconds(500);
        assert_eq!(ts, expected);
    }

    #[test]
    fn test_parse_timestamp_without_offset_is_utc() {
        let ts = parse_timestamp("2024-05-01T12:00:00").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        let err = parse_timestamp("yesterday").unwrap_err();
        assert!(matches!(err, PersistError::Internal(_)));
        assert!(err.to_string().contains("yesterday"));
    }

    #[test]
    fn test_new_message_row_shape() {
        let id = RecordId::Int(1);
        let row = NewMessageRow {
            session_id: &id,
            role: MessageRole::Assistant,
            content: "hello",
        };
        assert_eq!(
            serde_json::to_value([row]).unwrap(),
            serde_json::json!([{ "session_id": 1, "role": "assistant", "content": "hello" }])
        );
    }
}
