use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler::{self, AppState};

/// Build the axum router with all qremiser endpoints.
pub fn build_router(state: AppState) -> Router {
    let limit = state.config.max_upload_size;
    Router::new()
        .route("/", get(handler::form_handler).post(handler::describe_handler))
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .layer(DefaultBodyLimit::max(limit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
