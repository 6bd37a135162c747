// Application layer - Use cases and the storage contract they depend on
pub mod dataset_store;
pub mod errors;
pub mod ingestion_service;
pub mod retrieval_service;
