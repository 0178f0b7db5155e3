//! Health Cluster Service
//!
//! Assigns health-measurement records to one of four risk clusters.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    HEALTH CLUSTER                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐   ┌───────────┐   ┌───────────┐              │
//! │  │ Validator │ → │  Encoder  │ → │ Classifier│ → Catalog    │
//! │  └─────┬─────┘   └─────┬─────┘   └───────────┘              │
//! │        └───────┬───────┘                                    │
//! │                ▼                                            │
//! │        ┌───────────────┐                                    │
//! │        │ Parameter     │  (loaded once, immutable)          │
//! │        │ Store         │                                    │
//! │        └───────────────┘                                    │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The HTTP layer (Axum) only adapts requests to `logic::predict`.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;

use axum::{routing::{get, post}, Router};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use logic::PreprocessingParameters;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub params: &'static PreprocessingParameters,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/api/v1/predictions/cluster", post(handlers::prediction::predict_cluster))
        .route("/api/v1/model/info", get(handlers::prediction::model_info))
        .route("/api/v1/clusters", get(handlers::clusters::list))
        .route("/api/v1/clusters/:index", get(handlers::clusters::get));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(api_routes)
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

// ============================================================================
// TESTS
// ============================================================================
