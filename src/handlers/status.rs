use axum::Json;

use crate::models::response::StatusResponse;

/// Handler for GET /
pub async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".to_string(),
        message: "ZoraVerse backend running".to_string(),
    })
}

/// Handler for GET /health
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "OK".to_string(),
        message: "Service is healthy".to_string(),
    })
}
