mod common;

use common::{app, app_with_config, get, post_json, CountingStore, StubBackend};
use orion_api::config::Config;
use orion_persist::{MessageRole, PersistenceClient};
use orion_types::RecordId;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_chat_end_to_end() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::replying("hello"), store.clone());

    let (status, body) = post_json(
        router,
        "/chat",
        r#"{"message":"hi","sessionId":1,"userId":1}"#,
    )
    .await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "reply": "hello" }));

    let rows = store.inner.get_messages(&RecordId::Int(1)).await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].role, MessageRole::User);
    assert_eq!(rows[0].content, "hi");
    assert_eq!(rows[1].role, MessageRole::Assistant);
    assert_eq!(rows[1].content, "hello");
}

#[tokio::test]
async fn test_chat_missing_message_is_400_without_store_calls() {
    let store = Arc::new(CountingStore::default());

    for payload in [r#"{}"#, r#"{"sessionId":1}"#, r#"{"message":""}"#] {
        let router = app(StubBackend::replying("hello"), store.clone());
        let (status, body) = post_json(router, "/chat", payload).await;

        assert_eq!(status, 400);
        assert_eq!(body, json!({ "error": "Missing message." }));
    }

    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_chat_malformed_json_is_400() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::replying("hello"), store.clone());

    let (status, body) = post_json(router, "/chat", "{not json").await;

    assert_eq!(status, 400);
    assert!(body["error"].is_string());
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_chat_whitespace_message_is_relayed() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::replying("hello"), store.clone());

    let (status, body) = post_json(router, "/chat", r#"{"message":"   "}"#).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "reply": "hello" }));
    assert_eq!(store.inner.all_messages().await.len(), 2);
}

#[tokio::test]
async fn test_chat_slow_backend_times_out_with_error_body() {
    let mut config = Config::default();
    config.server.request_timeout_secs = 1;
    let store = Arc::new(CountingStore::default());
    let backend = StubBackend {
        reply: Some("too late".to_string()),
        delay: Some(Duration::from_secs(5)),
        ..StubBackend::default()
    };
    let router = app_with_config(config, backend, store.clone());

    let (status, body) = post_json(router, "/chat", r#"{"message":"hi"}"#).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "Internal Server Error" }));
    assert!(store.inner.all_messages().await.is_empty());
}

#[tokio::test]
async fn test_chat_empty_reply_stores_placeholder() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::default(), store.clone());

    let (status, body) = post_json(router, "/chat", r#"{"message":"hi"}"#).await;

    assert_eq!(status, 200);
    assert_eq!(body["reply"], "⚠️ No response from AI.");
    let rows = store.inner.all_messages().await;
    assert_eq!(rows[1].content, "⚠️ No response from AI.");
}

#[tokio::test]
async fn test_chat_repeated_calls_succeed() {
    let store = Arc::new(CountingStore::default());

    for _ in 0..3 {
        let router = app(StubBackend::replying("again"), store.clone());
        let (status, _) = post_json(
            router,
            "/chat",
            r#"{"message":"hi","sessionId":"abc","userId":"u1"}"#,
        )
        .await;
        assert_eq!(status, 200);
    }

    let rows = store.inner.get_messages(&RecordId::from("abc")).await.unwrap();
    assert_eq!(rows.len(), 6);
}

#[tokio::test]
async fn test_image_returns_url() {
    let store = Arc::new(CountingStore::default());
    let backend = StubBackend {
        image_url: Some("https://img.example/1.png".to_string()),
        ..StubBackend::default()
    };
    let router = app(backend, store.clone());

    let (status, body) = post_json(router, "/image", r#"{"prompt":"a lighthouse"}"#).await;

    assert_eq!(status, 200);
    assert_eq!(body, json!({ "imageUrl": "https://img.example/1.png" }));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_image_without_url_is_500_without_store_calls() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::default(), store.clone());

    let (status, body) = post_json(router, "/image", r#"{"prompt":"a lighthouse"}"#).await;

    assert_eq!(status, 500);
    assert_eq!(body, json!({ "error": "No image returned." }));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn test_image_missing_prompt_is_400() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::default(), store);

    let (status, body) = post_json(router, "/image", r#"{}"#).await;

    assert_eq!(status, 400);
    assert_eq!(body, json!({ "error": "Missing prompt." }));
}

#[tokio::test]
async fn test_session_messages_listing() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::replying("hello"), store.clone());
    post_json(router, "/chat", r#"{"message":"hi","sessionId":7}"#).await;

    let router = app(StubBackend::replying("hello"), store.clone());
    let (status, body) = get(router, "/sessions/7/messages").await;

    assert_eq!(status, 200);
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["sessionId"], 7);
    assert_eq!(messages[0]["role"], "user");
    assert_eq!(messages[1]["role"], "assistant");
    assert_eq!(messages[1]["content"], "hello");

    let router = app(StubBackend::replying("hello"), store);
    let (_, body) = get(router, "/sessions/unknown/messages").await;
    assert_eq!(body["messages"], json!([]));
}

#[tokio::test]
async fn test_health_reports_store() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::default(), store);

    let (status, body) = get(router, "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["store:counting"], "connected");
}

#[tokio::test]
async fn test_health_degraded_when_store_unreachable() {
    let store = Arc::new(CountingStore::unreachable());
    let router = app(StubBackend::default(), store);

    let (status, body) = get(router, "/health").await;

    assert_eq!(status, 200);
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["services"]["store:counting"], "disconnected");
}

#[tokio::test]
async fn test_openapi_document_lists_routes() {
    let store = Arc::new(CountingStore::default());
    let router = app(StubBackend::default(), store);

    let (status, body) = get(router, "/api/openapi.json").await;

    assert_eq!(status, 200);
    assert!(body["paths"]["/chat"].is_object());
    assert!(body["paths"]["/image"].is_object());
    assert!(body["paths"]["/sessions/{session_id}/messages"].is_object());
}
