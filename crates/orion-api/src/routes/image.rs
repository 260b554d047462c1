use axum::{extract::rejection::JsonRejection, extract::State, Json};
use orion_types::{ErrorBody, ImageBody, ImageReply};
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

/// Generate one square image from a prompt
#[utoipa::path(
    post,
    path = "/image",
    request_body = ImageBody,
    responses(
        (status = 200, description = "URL of the generated image", body = ImageReply),
        (status = 400, description = "Missing prompt or malformed body", body = ErrorBody),
        (status = 500, description = "Backend failure or no image returned", body = ErrorBody)
    ),
    tag = "image"
)]
pub async fn generate_image(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ImageBody>, JsonRejection>,
) -> ApiResult<Json<ImageReply>> {
    let Json(body) = body?;
    let image_url = state.relay.generate_image(body).await?;
    Ok(Json(ImageReply { image_url }))
}
