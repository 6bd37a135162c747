// Storage trait for uploaded datasets
use crate::application::errors::DatasetError;
use crate::domain::dataset::DatasetName;
use async_trait::async_trait;
use bytes::Bytes;

/// Opaque blob storage keyed by dataset name. Blobs are immutable once written.
#[async_trait]
pub trait DatasetStore: Send + Sync {
    /// Store `content` under a fresh name derived from `base_name`; never
    /// overwrites an existing dataset
    async fn put(&self, base_name: &str, content: Bytes) -> Result<DatasetName, DatasetError>;

    /// Load the complete blob stored under `name`
    async fn get(&self, name: &DatasetName) -> Result<Bytes, DatasetError>;
}
