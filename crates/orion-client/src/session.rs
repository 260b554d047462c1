use orion_types::{ChatBody, ImageBody, RecordId};

use crate::transcript::{Transcript, Turn};
use crate::transport::RelayTransport;

pub const ERROR_TURN_TEXT: &str = "⚠️ Failed to reach the server.";

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub session_id: RecordId,
    pub user_id: RecordId,
    pub model: String,
    /// Models whose name starts with one of these go to the image endpoint
    pub image_model_prefixes: Vec<String>,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            session_id: RecordId::Int(1),
            user_id: RecordId::Int(1),
            model: "gpt-4o".to_string(),
            image_model_prefixes: vec!["dall-e".to_string()],
        }
    }
}

impl SessionSettings {
    pub fn is_image_model(&self) -> bool {
        self.image_model_prefixes
            .iter()
            .any(|prefix| self.model.starts_with(prefix.as_str()))
    }
}

/// One conversation as seen by the user: the transcript, the pending input
/// and the selected model.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    transcript: Transcript,
    input: String,
    settings: SessionSettings,
}

impl ChatSession {
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            settings,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
    }

    pub fn select_model(&mut self, model: impl Into<String>) {
        self.settings.model = model.into();
    }

    /// Send the pending input
    ///
    /// The user turn is appended and the input cleared before the request
    /// goes out. Failures become an error turn; nothing is returned to the
    /// caller but the turn that was appended last. Blank input is a no-op
    /// and returns `None`.
    pub async fn submit(&mut self, transport: &dyn RelayTransport) -> Option<&Turn> {
        let text = self.input.trim().to_string();
        if text.is_empty() {
            return None;
        }

        self.transcript.push(Turn::user(text.clone()));
        self.input.clear();

        let turn = if self.settings.is_image_model() {
            transport
                .image(&ImageBody::new(text))
                .await
                .map(Turn::image)
        } else {
            let body = ChatBody::new(text)
                .session_id(self.settings.session_id.clone())
                .user_id(self.settings.user_id.clone())
                .model(self.settings.model.clone());
            transport.chat(&body).await.map(Turn::assistant)
        };

        let turn = turn.unwrap_or_else(|e| {
            tracing::warn!(model = %self.settings.model, "relay request failed: {}", e);
            Turn::error(e.server_message().unwrap_or(ERROR_TURN_TEXT))
        });

        Some(self.transcript.push(turn))
    }
}
