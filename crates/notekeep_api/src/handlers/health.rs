//! Health check and unknown-route fallback.

use crate::state::AppState;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::Json;
use serde_json::{json, Value};

/// `GET /` → service liveness.
pub async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "message": "Service is healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "environment": state.environment,
    }))
}

/// JSON 404 for routes that do not exist.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Value>) {
    let path = uri
        .path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "status": "error",
            "message": "Not Found: Invalid API endpoint",
            "path": path,
        })),
    )
}
