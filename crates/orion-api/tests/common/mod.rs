use async_trait::async_trait;
use axum::{body::Body, http::Request, Router};
use orion_api::{build_router, config::Config, state::AppState};
use orion_llm::{
    ChatClient, ChatRequest, ChatResponse, GeneratedImage, ImageClient, ImageRequest,
    ImageResponse,
};
use orion_persist::{
    DBMessage, InMemoryPersistenceClient, PersistError, PersistenceClient, Session, User,
};
use orion_types::RecordId;
use serde_json::Value;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

/// Completion and image backend with canned answers
#[derive(Default)]
pub struct StubBackend {
    pub reply: Option<String>,
    pub image_url: Option<String>,
    /// Held before answering a chat request
    pub delay: Option<Duration>,
}

impl StubBackend {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl ChatClient for StubBackend {
    async fn chat(&self, _request: ChatRequest) -> anyhow::Result<ChatResponse> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(ChatResponse {
            content: self.reply.clone(),
            ..ChatResponse::default()
        })
    }
}

#[async_trait]
impl ImageClient for StubBackend {
    async fn generate_image(&self, _request: ImageRequest) -> anyhow::Result<ImageResponse> {
        Ok(ImageResponse {
            images: self
                .image_url
                .iter()
                .map(|url| GeneratedImage {
                    url: Some(url.clone()),
                    revised_prompt: None,
                })
                .collect(),
        })
    }
}

/// In-memory store that counts every call made to it
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryPersistenceClient,
    /// Makes `ping` fail, as an unreachable store would
    pub unreachable: bool,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::default()
        }
    }
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PersistenceClient for CountingStore {
    fn backend_name(&self) -> &'static str {
        "counting"
    }

    async fn upsert_user(&self, user: &User) -> orion_persist::error::Result<()> {
        self.hit();
        self.inner.upsert_user(user).await
    }

    async fn upsert_session(&self, session: &Session) -> orion_persist::error::Result<()> {
        self.hit();
        self.inner.upsert_session(session).await
    }

    async fn save_message(&self, message: DBMessage) -> orion_persist::error::Result<()> {
        self.hit();
        self.inner.save_message(message).await
    }

    async fn get_messages(
        &self,
        session_id: &RecordId,
    ) -> orion_persist::error::Result<Vec<DBMessage>> {
        self.inner.get_messages(session_id).await
    }

    async fn ping(&self) -> orion_persist::error::Result<()> {
        if self.unreachable {
            return Err(PersistError::Connection("connection refused".to_string()));
        }
        Ok(())
    }
}

pub fn app(backend: StubBackend, store: Arc<CountingStore>) -> Router {
    app_with_config(Config::default(), backend, store)
}

pub fn app_with_config(config: Config, backend: StubBackend, store: Arc<CountingStore>) -> Router {
    let state = AppState::new(config, store, Arc::new(backend));
    build_router(Arc::new(state))
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (u16, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (u16, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (u16, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status().as_u16();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
