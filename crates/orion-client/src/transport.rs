use async_trait::async_trait;
use orion_types::{ChatBody, ChatReply, ErrorBody, ImageBody, ImageReply};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer; `message` is the server's `error` field when it sent one
    #[error("server answered {status}")]
    Server { status: u16, message: Option<String> },
}

impl TransportError {
    pub fn server_message(&self) -> Option<&str> {
        match self {
            TransportError::Server { message, .. } => message.as_deref(),
            TransportError::Http(_) => None,
        }
    }
}

/// How a chat session reaches the relay
#[async_trait]
pub trait RelayTransport: Send + Sync {
    /// `POST /chat`, returning the reply text
    async fn chat(&self, body: &ChatBody) -> Result<String, TransportError>;

    /// `POST /image`, returning the image URL
    async fn image(&self, body: &ImageBody) -> Result<String, TransportError>;
}

pub struct HttpTransport {
    http_client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Result<Self, TransportError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(180))
            .build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, TransportError>
    where
        B: Serialize + Sync + ?Sized,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(url = %url, "posting to relay");

        let response = self.http_client.post(&url).json(body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .ok()
                .map(|body| body.error);
            return Err(TransportError::Server {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}

#[async_trait]
impl RelayTransport for HttpTransport {
    async fn chat(&self, body: &ChatBody) -> Result<String, TransportError> {
        let reply: ChatReply = self.post("/chat", body).await?;
        Ok(reply.reply)
    }

    async fn image(&self, body: &ImageBody) -> Result<String, TransportError> {
        let reply: ImageReply = self.post("/image", body).await?;
        Ok(reply.image_url)
    }
}
