// Main entry point - Dependency injection and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use crate::application::ingestion_service::IngestionService;
use crate::application::retrieval_service::RetrievalService;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::fs_dataset_store::FsDatasetStore;
use crate::presentation::app_state::AppState;
use crate::presentation::router::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create store (infrastructure layer)
    let store = Arc::new(FsDatasetStore::new(config.storage.root.clone()));

    // Create services (application layer)
    let ingestion_service = IngestionService::new(store.clone());
    let retrieval_service = RetrievalService::new(store.clone(), config.analysis.timestamp_format);

    // Create application state
    let state = Arc::new(AppState {
        ingestion_service,
        retrieval_service,
    });

    // Build router (presentation layer)
    let router = build_router(state, config.upload.max_bytes);

    // Start server
    let addr = config.server.socket_addr()?;
    tracing::info!(
        %addr,
        storage_root = %store.root().display(),
        "Starting fuel-log service"
    );

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    Ok(())
}
