//! Route configuration and setup.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

// Write notifications are small JSON documents; anything larger is noise.
const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Setup all application routes
pub fn setup_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route(
            "/api/v0/reports/copy",
            post(handlers::copy_reports::copy_reports),
        )
        .route(
            "/api/v0/objects/validate",
            post(handlers::validate_object::validate_object),
        )
        .layer(TraceLayer::new_for_http())
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}
