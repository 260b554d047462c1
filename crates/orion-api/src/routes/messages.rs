use axum::{
    extract::{Path, State},
    Json,
};
use orion_types::{ErrorBody, RecordId, TranscriptEntry, TranscriptResponse};
use std::sync::Arc;

use crate::{error::ApiResult, state::AppState};

/// List the stored messages of a session, oldest first
///
/// An unknown session yields an empty list.
#[utoipa::path(
    get,
    path = "/sessions/{session_id}/messages",
    params(
        (
            "session_id" = String,
            Path,
            description = "Session ID (numeric ids are matched as numbers)"
        )
    ),
    responses(
        (status = 200, description = "Session transcript", body = TranscriptResponse),
        (status = 500, description = "Storage failure", body = ErrorBody)
    ),
    tag = "messages"
)]
pub async fn list_messages(
    State(state): State<Arc<AppState>>,
    Path(session_id): Path<String>,
) -> ApiResult<Json<TranscriptResponse>> {
    let session_id = session_id
        .parse::<RecordId>()
        .unwrap_or_else(|never| match never {});

    let messages = state.persist.get_messages(&session_id).await?;

    Ok(Json(TranscriptResponse {
        messages: messages.into_iter().map(TranscriptEntry::from).collect(),
    }))
}
