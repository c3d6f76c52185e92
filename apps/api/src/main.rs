mod config;
mod detection;
mod errors;
mod llm_client;
mod models;
mod params;
mod pipeline;
mod recipes;
mod routes;
mod state;
mod upload;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::detection::confidence::{ConfidenceScorer, FixedConfidence, PlaceholderConfidence};
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Leftover Chef API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Completion Service client
    let llm = GeminiClient::new(
        config.gemini_api_key.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Placeholder confidence by default; FIXED_CONFIDENCE pins every score
    let confidence: Arc<dyn ConfidenceScorer> = match config.fixed_confidence {
        Some(value) => Arc::new(FixedConfidence(value)),
        None => Arc::new(PlaceholderConfidence::default()),
    };
    info!("Confidence backend: {}", confidence.backend());

    let state = AppState {
        llm: Arc::new(llm),
        config: config.clone(),
        confidence,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the web client's host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
