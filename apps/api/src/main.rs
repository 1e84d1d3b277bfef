mod cache;
mod config;
mod errors;
mod matching;
mod models;
mod parsing;
mod resumes;
mod routes;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cache::build_cache;
use crate::config::Config;
use crate::matching::scorer::KeywordMatchScorer;
use crate::parsing::text::PdfTextExtractor;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::ResumeStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer v{}", env!("CARGO_PKG_VERSION"));

    // Redis when configured and reachable, in-process otherwise
    let cache = build_cache(&config).await;
    info!(backend = cache.backend(), "Result cache initialized");

    let resumes = Arc::new(ResumeStore::new());

    let state = AppState {
        config: config.clone(),
        cache,
        resumes: Arc::clone(&resumes),
        extractor: Arc::new(PdfTextExtractor),
        scorer: Arc::new(KeywordMatchScorer::default()),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let dropped = resumes.len().await;
    resumes.clear().await;
    info!(dropped, "Resume store cleared, shutting down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to install Ctrl+C handler: {e}");
    }
}
