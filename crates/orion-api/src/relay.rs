use std::sync::Arc;

use orion_llm::{ChatRequest, ChatResponse, ImageRequest, LLMClient, Message};
use orion_persist::{DBMessage, PersistError, PersistenceClient, Session, User};
use orion_types::{ChatBody, ImageBody};
use thiserror::Error;

use crate::config::{ImageConfig, RelayConfig};

#[derive(Debug, Error)]
pub enum RelayError {
    /// Caller left out a required field; nothing was called or stored
    #[error("Missing {0}.")]
    MissingField(&'static str),

    #[error("Completion backend error: {0:#}")]
    Backend(anyhow::Error),

    #[error("Persistence error: {0}")]
    Persist(#[from] PersistError),

    #[error("No image returned.")]
    NoImage,
}

/// Turns a chat body into a stored exchange and a reply
///
/// One instance is shared by every request. The two message writes are
/// sequential and not transactional: if the second fails, the user message
/// stays behind on its own.
pub struct ConversationRelay {
    llm: Arc<dyn LLMClient>,
    persist: Arc<dyn PersistenceClient>,
    relay: RelayConfig,
    image: ImageConfig,
}

impl ConversationRelay {
    pub fn new(
        llm: Arc<dyn LLMClient>,
        persist: Arc<dyn PersistenceClient>,
        relay: RelayConfig,
        image: ImageConfig,
    ) -> Self {
        Self {
            llm,
            persist,
            relay,
            image,
        }
    }

    pub async fn relay_chat(&self, body: ChatBody) -> Result<String, RelayError> {
        let message = required(body.message, "message")?;
        let session_id = body
            .session_id
            .unwrap_or_else(|| self.relay.default_session_id.clone());
        let user_id = body
            .user_id
            .unwrap_or_else(|| self.relay.default_user_id.clone());
        let model = body
            .model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| self.relay.default_model.clone());

        tracing::debug!(%session_id, %user_id, model = %model, "relaying chat message");

        self.persist
            .upsert_user(&User::new(user_id.clone(), self.relay.guest_name.clone()))
            .await?;
        self.persist
            .upsert_session(&Session::new(session_id.clone(), user_id))
            .await?;

        let request = ChatRequest::new(model, vec![Message::user(message.clone())]);
        let response = self.llm.chat(request).await.map_err(RelayError::Backend)?;
        let reply = self.extract_reply(&response);

        self.persist
            .save_message(DBMessage::user(session_id.clone(), message))
            .await?;
        self.persist
            .save_message(DBMessage::assistant(session_id, reply.clone()))
            .await?;

        Ok(reply)
    }

    /// Image generation; nothing is stored
    pub async fn generate_image(&self, body: ImageBody) -> Result<String, RelayError> {
        let prompt = required(body.prompt, "prompt")?;

        let request = ImageRequest::new(self.image.model.clone(), prompt)
            .with_size(self.image.size.clone())
            .with_count(1);
        let response = self
            .llm
            .generate_image(request)
            .await
            .map_err(RelayError::Backend)?;

        response
            .first_url()
            .map(str::to_string)
            .ok_or(RelayError::NoImage)
    }

    fn extract_reply(&self, response: &ChatResponse) -> String {
        match response.content.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => {
                tracing::warn!(
                    finish_reason = ?response.finish_reason,
                    "backend returned no text, storing placeholder"
                );
                self.relay.empty_reply_placeholder.clone()
            }
        }
    }
}

/// Absent, `null` and `""` count as missing; whitespace is relayed as sent
fn required(value: Option<String>, field: &'static str) -> Result<String, RelayError> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RelayError::MissingField(field)),
    }
}
