use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod scratch;
pub mod state;
pub mod upload;

pub use config::{Overrides, Settings};
pub use error::ApiError;
pub use state::AppState;

/// Build the service router.
pub fn router(state: Arc<AppState>, settings: &Settings) -> Router {
    Router::new()
        .route("/extract-text", post(handlers::extract::extract_text))
        .route("/health", get(handlers::health::health))
        .layer(DefaultBodyLimit::max(settings.body_limit_bytes()))
        .layer(settings.cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Create the upload directory if it does not exist yet.
pub fn prepare_upload_dir(dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(dir)
}
