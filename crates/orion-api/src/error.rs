use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orion_types::ErrorBody;
use thiserror::Error;

use crate::relay::RelayError;

const GENERIC_ERROR: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Relay(#[from] RelayError),

    #[error("Persistence error: {0}")]
    Persist(#[from] orion_persist::PersistError),

    /// The request outlived `server.request_timeout_secs`
    #[error("Request timed out")]
    Timeout,
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Relay(RelayError::MissingField(_)) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }
            ApiError::Relay(RelayError::NoImage) => {
                tracing::error!("Image backend returned no URL");
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
            ApiError::Relay(ref e) => {
                tracing::error!("Relay error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
            ApiError::Persist(ref e) => {
                tracing::error!("Persistence error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
            ApiError::Timeout => {
                tracing::error!("Request timed out waiting on an upstream call");
                (StatusCode::INTERNAL_SERVER_ERROR, GENERIC_ERROR.to_string())
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
