// Ingestion service - Use case for accepting uploaded datasets
use crate::application::dataset_store::DatasetStore;
use crate::application::errors::DatasetError;
use crate::domain::dataset::DatasetName;
use bytes::Bytes;
use serde::Serialize;
use std::sync::Arc;

const JSON_MEDIA_TYPE: &str = "application/json";

/// One file as received from a client
#[derive(Debug, Clone)]
pub struct Upload {
    pub original_name: String,
    pub content_type: Option<String>,
    pub content: Bytes,
}

/// Descriptor of an accepted upload, echoed back to the client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredDataset {
    pub stored_name: DatasetName,
    pub original_name: String,
    pub content_type: String,
    pub size: usize,
}

#[derive(Clone)]
pub struct IngestionService {
    store: Arc<dyn DatasetStore>,
}

impl IngestionService {
    pub fn new(store: Arc<dyn DatasetStore>) -> Self {
        Self { store }
    }

    pub async fn ingest(&self, upload: Upload) -> Result<StoredDataset, DatasetError> {
        let content_type = match upload.content_type.as_deref() {
            Some(ct) if is_json_media_type(ct) => ct.to_string(),
            other => {
                return Err(DatasetError::Validation(format!(
                    "Invalid file type {:?}. Only JSON files are allowed.",
                    other.unwrap_or("none")
                )));
            }
        };

        if upload.content.is_empty() {
            return Err(DatasetError::Validation(format!(
                "uploaded file {:?} is empty",
                upload.original_name
            )));
        }

        serde_json::from_slice::<serde::de::IgnoredAny>(&upload.content)
            .map_err(|e| DatasetError::parse(upload.original_name.as_str(), e))?;

        let size = upload.content.len();
        let stored_name = self.store.put(&upload.original_name, upload.content).await?;

        Ok(StoredDataset {
            stored_name,
            original_name: upload.original_name,
            content_type,
            size,
        })
    }
}

/// Compare the media-type essence only; parameters such as charset are ignored
fn is_json_media_type(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(|essence| essence.trim().eq_ignore_ascii_case(JSON_MEDIA_TYPE))
        .unwrap_or(false)
}
