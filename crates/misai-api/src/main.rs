//! MISAI development verification service

use misai_api::{router, ApiConfig, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "misai_api=debug,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting MISAI verification service");

    let config = ApiConfig::default();
    if config.gemini_api_key.is_none() {
        warn!("GEMINI_API_KEY is not set, MisBot will answer with a fixed notice");
    }

    let addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await
}
