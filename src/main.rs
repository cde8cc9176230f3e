//! MathSolver server binary

use mathsolver::{
    api::{build_router, AppState},
    config::Config,
    gemini::GeminiClient,
    store::{FirestoreClient, ServiceAccountKey},
};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading configuration
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // Both external clients are constructed once here and injected into the
    // handler state; nothing else is initialized per request.
    let gemini = GeminiClient::new(config.gemini.clone())
        .map_err(|e| anyhow::anyhow!("Failed to create Gemini client: {}", e))?;

    let key = ServiceAccountKey::from_file(&config.firestore.credentials_path)
        .map_err(|e| anyhow::anyhow!("Failed to load service account key: {}", e))?;
    info!("Using Firestore project {}", key.project_id);

    let store = FirestoreClient::new(&config.firestore, key)
        .map_err(|e| anyhow::anyhow!("Failed to create Firestore client: {}", e))?;

    let state = AppState {
        gemini: Arc::new(gemini),
        store: Arc::new(store),
    };

    let router = build_router(state, config.server.max_upload_bytes);

    let listener =
        tokio::net::TcpListener::bind((config.server.host.as_str(), config.server.port)).await?;
    info!("MathSolver listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
