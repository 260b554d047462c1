use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// Turns the bare 408 from `TimeoutLayer` into the usual `{"error": ...}` body
///
/// No handler answers 408 itself, so the status alone identifies an elapsed
/// request timeout.
pub async fn timeout_as_error(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return ApiError::Timeout.into_response();
    }
    response
}
