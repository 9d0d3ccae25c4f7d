//! NVMe Drive Risk Server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drive_risk::config::Config;
use drive_risk::predictor::{FallbackModelService, HttpModelService, SharedModelService};
use drive_risk::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::from_env();

    // Initialize logging
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "drive_risk=debug,tower_http=debug".into());
    if config.json_logs() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Drive Risk Server starting ({})...", config.environment);

    let model_service: SharedModelService = match &config.model_service_url {
        Some(url) => {
            tracing::info!("Model service: {}", url);
            Arc::new(
                HttpModelService::new(url, config.model_service_timeout_secs)
                    .context("Failed to create model service client")?,
            )
        }
        None => {
            tracing::warn!("MODEL_SERVICE_URL not set, serving fallback predictions");
            Arc::new(FallbackModelService)
        }
    };

    let state = AppState::new(config.clone(), model_service);
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
