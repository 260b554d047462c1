// Configuration layer for backend client creation

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::openai::OpenAIClient;
use crate::traits::LLMClient;

/// Configuration for the OpenAI provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Base URL for OpenAI API (optional, defaults to https://api.openai.com/v1)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }
}

/// Factory for creating backend clients from configuration
pub struct ClientFactory;

impl ClientFactory {
    pub fn create_client(config: OpenAIConfig) -> Result<Arc<dyn LLMClient>> {
        let client = match config.base_url {
            Some(base_url) => OpenAIClient::with_base_url(config.api_key, base_url)?,
            None => OpenAIClient::new(config.api_key)?,
        };
        Ok(Arc::new(client))
    }
}
