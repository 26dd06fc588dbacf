//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::error::ApiError;
use crate::models::AppConfig;
use crate::services::ColorizeService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub colorizer: Arc<ColorizeService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let config = Arc::new(config);
    let colorizer = Arc::new(ColorizeService::new(config.clone()));
    AppState { config, colorizer }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. The body limit
/// comes from `server.max_body_bytes`; base64 uploads of large images exceed
/// axum's default.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_body_bytes;

    Router::new()
        .route("/api/colorize", post(handle_colorize))
        .route("/api/mask", post(handle_mask))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_colorize(
    State(state): State<AppState>,
    request: Json<api::ColorizeRequest>,
) -> Result<axum::response::Response, ApiError> {
    api::handle_colorize(State(state.colorizer), request).await
}

async fn handle_mask(
    State(state): State<AppState>,
    request: Json<api::ColorizeRequest>,
) -> Result<Json<api::MaskResponse>, ApiError> {
    api::handle_mask(State(state.colorizer), request).await
}
