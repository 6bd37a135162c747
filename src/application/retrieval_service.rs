// Retrieval service - Use cases for reading back and analyzing stored datasets
use crate::application::dataset_store::DatasetStore;
use crate::application::errors::DatasetError;
use crate::domain::dataset::DatasetName;
use crate::domain::fuel_analysis;
use crate::domain::telemetry::{decode_records, AnalysisResult};
use crate::domain::time_format::TimestampFormat;
use serde_json::Value;
use std::sync::Arc;

#[derive(Clone)]
pub struct RetrievalService {
    store: Arc<dyn DatasetStore>,
    timestamp_format: TimestampFormat,
}

impl RetrievalService {
    pub fn new(store: Arc<dyn DatasetStore>, timestamp_format: TimestampFormat) -> Self {
        Self {
            store,
            timestamp_format,
        }
    }

    /// The stored document, parsed but otherwise untouched
    pub async fn raw(&self, name: &str) -> Result<Value, DatasetError> {
        let name = Self::lookup_name(name)?;
        let content = self.store.get(&name).await?;
        serde_json::from_slice(&content).map_err(|e| DatasetError::parse(name.as_str(), e))
    }

    /// Refuel events and net consumption of the stored dataset, computed fresh
    pub async fn analyze(&self, name: &str) -> Result<AnalysisResult, DatasetError> {
        let name = Self::lookup_name(name)?;
        let content = self.store.get(&name).await?;
        let records = decode_records(&content).map_err(|e| DatasetError::parse(name.as_str(), e))?;

        let result = fuel_analysis::analyze(records, self.timestamp_format)?;
        tracing::info!(
            %name,
            events = result.fuel_events.len(),
            total_fuel_consumed = result.total_fuel_consumed,
            "fuel analysis complete"
        );
        Ok(result)
    }

    // A name that could not have been issued by the store cannot exist
    fn lookup_name(name: &str) -> Result<DatasetName, DatasetError> {
        DatasetName::parse(name).map_err(|_| DatasetError::NotFound(name.to_string()))
    }
}
