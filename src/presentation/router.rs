// Route table for the dataset API
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{analyze_dataset, get_dataset, health_check, upload_dataset};
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route(
            "/upload-json",
            post(upload_dataset).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/get-json/:filename", get(get_dataset))
        .route("/fuel-analysis/:filename", get(analyze_dataset))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
