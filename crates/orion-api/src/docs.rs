use axum::Json;
use utoipa::OpenApi;

use crate::routes::{chat, health, image, messages};

#[derive(OpenApi)]
#[openapi(
    info(title = "Orion Chat API", description = "Chat relay and image generation"),
    paths(
        chat::send_chat,
        image::generate_image,
        messages::list_messages,
        health::health_check,
    ),
    components(schemas(
        orion_types::ChatBody,
        orion_types::ChatReply,
        orion_types::ImageBody,
        orion_types::ImageReply,
        orion_types::ErrorBody,
        orion_types::TranscriptEntry,
        orion_types::TranscriptResponse,
        orion_types::Role,
        health::HealthResponse,
    )),
    tags(
        (name = "chat", description = "Conversation relay"),
        (name = "image", description = "Image generation"),
        (name = "messages", description = "Stored transcripts"),
        (name = "health", description = "Service status")
    )
)]
pub struct ApiDoc;

/// Serve the generated OpenAPI document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
