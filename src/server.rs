//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{limit::RequestBodyLimitLayer, services::ServeDir, trace::TraceLayer};

use crate::api;
use crate::models::AppConfig;
use crate::services::{DisplayState, DitherPool, ImagePipeline, ImageStore};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub pipeline: Arc<ImagePipeline>,
    pub display: Arc<DisplayState>,
}

impl FromRef<AppState> for Arc<ImagePipeline> {
    fn from_ref(state: &AppState) -> Self {
        state.pipeline.clone()
    }
}

impl FromRef<AppState> for Arc<DisplayState> {
    fn from_ref(state: &AppState) -> Self {
        state.display.clone()
    }
}

/// Create application state from configuration.
///
/// Creates the image directory, starts the dither workers and restores the
/// current image from disk.
pub async fn create_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let store = Arc::new(ImageStore::new(&config.images_dir));
    store.ensure_dir().await.map_err(|e| {
        anyhow::anyhow!(
            "Failed to create image directory {}: {e}",
            config.images_dir.display()
        )
    })?;

    let pool = Arc::new(DitherPool::new(config.dither.workers, config.dither.queue)?);
    let pipeline = Arc::new(ImagePipeline::new(&config, store.clone(), pool));
    let display = Arc::new(
        DisplayState::load(store, &config.state_file, config.subscriber_buffer).await,
    );

    let state_file = display.state_file().display();
    tracing::info!(
        width = pipeline.canvas().width,
        height = pipeline.canvas().height,
        workers = pipeline.workers(),
        state_file = %state_file,
        "Application state ready"
    );

    Ok(AppState {
        config: Arc::new(config),
        pipeline,
        display,
    })
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests.
pub fn build_router(state: AppState) -> Router {
    let max_upload = state.config.max_upload_bytes;
    let images = ServeDir::new(&state.config.images_dir);

    Router::new()
        .route("/upload", post(api::handle_upload))
        .route("/current", get(api::handle_current))
        .route("/all", get(api::handle_all))
        .route("/select", post(api::handle_select))
        .route("/delete", post(api::handle_delete))
        .route("/clear", get(api::handle_clear).post(api::handle_clear))
        .route("/events", get(api::handle_events))
        .route("/ws", get(api::handle_ws))
        .nest_service("/image", images)
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
        // Multipart bodies are capped by the tower-http limit instead
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(max_upload))
        .layer(TraceLayer::new_for_http())
}
