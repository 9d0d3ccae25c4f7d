//! NVMe Drive Risk Service
//!
//! Presents multi-model failure-risk predictions for NVMe drives.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DRIVE RISK SERVICE                       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌─────────────────┐  ┌───────────────────┐ │
//! │  │  API      │  │  Risk Logic     │  │  Model Service    │ │
//! │  │  (Axum)   │─▶│  (pure core)    │◀─│  Client (HTTP /   │ │
//! │  │           │  │                 │  │  fallback)        │ │
//! │  └───────────┘  └─────────────────┘  └─────────┬─────────┘ │
//! └────────────────────────────────────────────────┼───────────┘
//!                                                  ▼
//!                                      external prediction models
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod predictor;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use logic::{FeatureCatalog, ScaleTable};
use predictor::SharedModelService;

/// Shared application state (read-only after startup)
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<FeatureCatalog>,
    pub scale: Arc<ScaleTable>,
    pub model_service: SharedModelService,
    pub config: config::Config,
}

impl AppState {
    pub fn new(config: config::Config, model_service: SharedModelService) -> Self {
        Self {
            catalog: Arc::new(FeatureCatalog::standard()),
            scale: Arc::new(ScaleTable::standard()),
            model_service,
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health::index))
        .route("/api/health", get(handlers::health::check))
        .route("/api/features", get(handlers::features::list))
        .route("/api/predict", post(handlers::predict::predict))
        .route("/api/train/:model", post(handlers::train::train))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
