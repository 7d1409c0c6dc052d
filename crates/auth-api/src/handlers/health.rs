use axum::{http::StatusCode, Json};

use crate::response::{HealthResponse, StatusResponse};

/// Public liveness probe.
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    )
}

/// Behind the session middleware, so a 200 also proves the session is valid.
pub async fn health_check() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "Ok".to_string(),
    })
}
