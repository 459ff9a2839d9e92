//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, Method},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::api;
use crate::models::{AppConfig, DitherRequest};
use crate::services::DitherService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub dither: Arc<DitherService>,
}

/// Create application state from a loaded configuration.
pub fn create_app_state(config: AppConfig) -> AppState {
    let dither = Arc::new(DitherService::new(config.max_dimension));
    AppState {
        config: Arc::new(config),
        dither,
    }
}

/// Build the router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. When the
/// configuration names a static directory, unmatched paths are served
/// from it.
pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_request_bytes;
    let static_dir = state.config.static_dir.clone();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    let mut router = Router::new()
        .route("/api/dither", post(handle_dither))
        .route("/api/health", get(api::handle_health))
        // Health check
        .route("/health", get(|| async { "OK" }))
        .with_state(state);

    if let Some(dir) = static_dir {
        tracing::info!(dir = %dir.display(), "Serving static files");
        router = router.fallback_service(ServeDir::new(dir));
    }

    router
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// Wrapper handler to extract the service from the shared state

async fn handle_dither(
    State(state): State<AppState>,
    payload: Result<Json<DitherRequest>, axum::extract::rejection::JsonRejection>,
) -> Response {
    api::handle_dither(State(state.dither), payload).await
}
