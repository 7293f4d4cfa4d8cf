mod analysis;
mod config;
mod envelope;
mod errors;
mod llm_client;
mod models;
mod review;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::extract::PdfExtractReader;
use crate::analysis::pipeline::{AnalysisPipeline, ModelSettings};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::review::view::ReviewViews;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting CV Reviewer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.anthropic_api_key.clone(),
        config.anthropic_api_url.clone(),
        Duration::from_secs(config.llm_timeout_secs),
    )?;
    info!(
        "LLM client initialized (validation: {}, feedback: {})",
        config.validation_model, config.feedback_model
    );

    let pipeline = AnalysisPipeline::new(
        Arc::new(llm),
        Arc::new(PdfExtractReader),
        ModelSettings {
            validation_model: config.validation_model.clone(),
            feedback_model: config.feedback_model.clone(),
        },
    );

    // Build app state
    let state = AppState {
        pipeline: Arc::new(pipeline),
        views: Arc::new(ReviewViews::new()?),
        max_body_bytes: config.max_body_bytes,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
