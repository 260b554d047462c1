use mockito::Matcher;
use orion_llm::{ChatClient, ChatRequest, ImageClient, ImageRequest, Message, OpenAIClient};
use serde_json::json;

#[tokio::test]
async fn test_chat_returns_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "gpt-4o",
            "messages": [{ "role": "user", "content": "hi" }],
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "id": "chatcmpl-1",
                "object": "chat.completion",
                "created": 1,
                "model": "gpt-4o",
                "choices": [{
                    "index": 0,
                    "message": { "role": "assistant", "content": "  hello  " },
                    "finish_reason": "stop"
                }],
                "usage": { "prompt_tokens": 3, "completion_tokens": 2, "total_tokens": 5 }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("test-key", server.url()).unwrap();
    let response = client
        .chat(ChatRequest::new("gpt-4o", vec![Message::user("hi")]))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.content.as_deref(), Some("  hello  "));
    assert_eq!(response.finish_reason.as_deref(), Some("stop"));
    assert_eq!(response.usage.unwrap().total_tokens, 5);
}

#[tokio::test]
async fn test_chat_without_choices_has_no_content() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("test-key", server.url()).unwrap();
    let response = client
        .chat(ChatRequest::new("gpt-4o", vec![Message::user("hi")]))
        .await
        .unwrap();

    assert!(response.content.is_none());
    assert!(response.usage.is_none());
}

#[tokio::test]
async fn test_chat_surfaces_api_errors() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_body("rate limited")
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("test-key", server.url()).unwrap();
    let err = client
        .chat(ChatRequest::new("gpt-4o", vec![Message::user("hi")]))
        .await
        .unwrap_err();

    let msg = err.to_string();
    assert!(msg.contains("OpenAI API error"));
    assert!(msg.contains("429"));
    assert!(msg.contains("rate limited"));
}

#[tokio::test]
async fn test_generate_image_requests_one_square_image() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/images/generations")
        .match_body(Matcher::Json(json!({
            "model": "dall-e-3",
            "prompt": "a red fox",
            "n": 1,
            "size": "1024x1024",
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "created": 1700000000,
                "data": [{
                    "url": "https://img.example/fox.png",
                    "revised_prompt": "a red fox in snow"
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("test-key", server.url()).unwrap();
    let response = client
        .generate_image(ImageRequest::new("dall-e-3", "a red fox"))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(response.first_url(), Some("https://img.example/fox.png"));
    assert_eq!(
        response.images[0].revised_prompt.as_deref(),
        Some("a red fox in snow")
    );
}

#[tokio::test]
async fn test_generate_image_without_url() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/images/generations")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"created":1,"data":[{"b64_json":"AAAA"}]}"#)
        .create_async()
        .await;

    let client = OpenAIClient::with_base_url("test-key", server.url()).unwrap();
    let response = client
        .generate_image(ImageRequest::new("dall-e-3", "x"))
        .await
        .unwrap();

    assert_eq!(response.first_url(), None);
}
