// Error taxonomy shared by the ingestion and retrieval use cases
use crate::domain::dataset::InvalidDatasetName;
use crate::domain::fuel_analysis::AnalysisError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    /// Malformed or empty input; not worth retrying without fixing it
    #[error("{0}")]
    Validation(String),

    #[error("dataset {0} not found")]
    NotFound(String),

    #[error("invalid JSON in {context}: {source}")]
    Parse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to store dataset {name}: {source}")]
    StorageWrite {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read dataset {name}: {source}")]
    StorageRead {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

impl DatasetError {
    pub fn parse(context: impl Into<String>, source: serde_json::Error) -> Self {
        DatasetError::Parse {
            context: context.into(),
            source,
        }
    }

    /// Only storage failures may clear up on their own
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DatasetError::StorageWrite { .. } | DatasetError::StorageRead { .. }
        )
    }
}

impl From<AnalysisError> for DatasetError {
    fn from(err: AnalysisError) -> Self {
        DatasetError::Validation(err.to_string())
    }
}

impl From<InvalidDatasetName> for DatasetError {
    fn from(err: InvalidDatasetName) -> Self {
        DatasetError::Validation(err.to_string())
    }
}
