//! MISAI development verification service
//!
//! Serves the same endpoints as the production backend. Scores are derived
//! from a digest of the submitted content, so a given input always yields
//! the same judgment. MisBot replies are relayed to Gemini when an API key
//! is configured.

pub mod error;
pub mod gemini;
pub mod routes;
pub mod scorer;

pub use error::{ApiError, ApiResult};

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers
pub struct AppState {
    pub config: ApiConfig,
    pub http: reqwest::Client,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub max_upload_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: std::env::var("MISAI_BIND_ADDR")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            gemini_api_key: std::env::var("GEMINI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            gemini_model: std::env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            max_upload_size: 100 * 1024 * 1024, // 100MB
        }
    }
}

/// Build the service router with CORS, tracing and the upload limit applied
pub fn router(state: Arc<AppState>) -> Router {
    let max_upload_size = state.config.max_upload_size;

    Router::new()
        // Liveness
        .route("/", get(routes::root))
        .route("/health", get(routes::health_check))

        // Verification
        .route("/testai/:model", post(routes::verify::test_ai))
        .route("/testimage", post(routes::verify::test_image))
        .route("/testvideo", post(routes::verify::test_video))

        // Chat
        .route("/misbot", post(routes::misbot::misbot))

        .layer(DefaultBodyLimit::max(max_upload_size))

        // CORS
        .layer(CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any))

        // Tracing
        .layer(TraceLayer::new_for_http())

        .with_state(state)
}
