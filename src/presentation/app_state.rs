// Application state for HTTP handlers
use crate::application::ingestion_service::IngestionService;
use crate::application::retrieval_service::RetrievalService;

#[derive(Clone)]
pub struct AppState {
    pub ingestion_service: IngestionService,
    pub retrieval_service: RetrievalService,
}
