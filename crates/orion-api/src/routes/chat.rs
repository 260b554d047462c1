use axum::{extract::rejection::JsonRejection, extract::State, Json};
use orion_types::{ChatBody, ChatReply, ErrorBody};
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

/// Relay one chat message
///
/// Ensures the user and session exist, asks the completion backend for a
/// reply and stores both sides of the exchange.
#[utoipa::path(
    post,
    path = "/chat",
    request_body = ChatBody,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReply),
        (status = 400, description = "Missing message or malformed body", body = ErrorBody),
        (status = 500, description = "Backend or storage failure", body = ErrorBody)
    ),
    tag = "chat"
)]
pub async fn send_chat(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> ApiResult<Json<ChatReply>> {
    let Json(body) = body?;
    let reply = state.relay.relay_chat(body).await?;
    Ok(Json(ChatReply { reply }))
}
