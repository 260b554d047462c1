use crate::types::Message;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Trait for text completion backends (GPT-4o, etc)
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Non-streaming chat completion
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

/// Trait for image generation backends (DALL-E, etc)
#[async_trait]
pub trait ImageClient: Send + Sync {
    async fn generate_image(&self, request: ImageRequest) -> Result<ImageResponse>;
}

/// Convenience trait for clients that support both chat and images
pub trait LLMClient: ChatClient + ImageClient {}

impl<T: ChatClient + ImageClient> LLMClient for T {}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
}

impl ChatRequest {
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatResponse {
    /// First choice's content, untouched. `None` when the backend sent no choice
    /// or a null content.
    pub content: Option<String>,
    pub usage: Option<TokenUsage>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    pub total_tokens: u32,
}

pub const DEFAULT_IMAGE_SIZE: &str = "1024x1024";

#[derive(Debug, Clone)]
pub struct ImageRequest {
    pub model: String,
    pub prompt: String,
    pub n: u8,
    pub size: String,
}

impl ImageRequest {
    /// One square image
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            n: 1,
            size: DEFAULT_IMAGE_SIZE.to_string(),
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn with_count(mut self, n: u8) -> Self {
        self.n = n;
        self
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratedImage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ImageResponse {
    pub images: Vec<GeneratedImage>,
}

impl ImageResponse {
    /// URL of the first image, skipping empty strings
    pub fn first_url(&self) -> Option<&str> {
        self.images
            .first()
            .and_then(|img| img.url.as_deref())
            .filter(|url| !url.is_empty())
    }
}
