//! API routes

pub mod misbot;
pub mod verify;

use axum::Json;
use serde::Serialize;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "MISAI verification service is running".to_string(),
    })
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
