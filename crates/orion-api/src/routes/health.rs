use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
///
/// Always answers 200; a store that fails its ping is reported as
/// `disconnected` and the overall status as `degraded`.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service status", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let mut services = HashMap::new();
    let backend = state.persist.backend_name();

    let store_ok = match state.persist.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(backend, "store health check failed: {}", e);
            false
        }
    };
    services.insert(
        format!("store:{}", backend),
        if store_ok { "connected" } else { "disconnected" }.to_string(),
    );

    Json(HealthResponse {
        status: if store_ok { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    })
}
