pub mod config;
pub mod openai;
pub mod traits;
pub mod types;

pub use config::{ClientFactory, OpenAIConfig};
pub use openai::OpenAIClient;
pub use traits::{
    ChatClient, ChatRequest, ChatResponse, GeneratedImage, ImageClient, ImageRequest,
    ImageResponse, LLMClient, TokenUsage, DEFAULT_IMAGE_SIZE,
};
pub use types::Message;
