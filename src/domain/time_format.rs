// Timestamp rendering for analysis output
use crate::domain::fuel_analysis::AnalysisError;
use chrono::{DateTime, SecondsFormat};
use serde::Deserialize;

/// How event timestamps are rendered. Independent of the host locale and
/// timezone so output is identical across environments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// UTC RFC 3339 with millisecond precision, e.g. `2024-03-01T08:15:00.000Z`
    #[default]
    Iso8601,
    /// The raw epoch-millisecond value as a decimal string
    EpochMillis,
}

impl TimestampFormat {
    pub fn format(self, timestamp_ms: i64) -> Result<String, AnalysisError> {
        match self {
            TimestampFormat::Iso8601 => DateTime::from_timestamp_millis(timestamp_ms)
                .map(|dt| dt.to_rfc3339_opts(SecondsFormat::Millis, true))
                .ok_or(AnalysisError::TimestampOutOfRange(timestamp_ms)),
            TimestampFormat::EpochMillis => Ok(timestamp_ms.to_string()),
        }
    }
}
