// Fuel event analysis - refuel detection and consumption over one dataset
use crate::domain::telemetry::{sort_chronologically, AnalysisResult, FuelEvent, TelemetryRecord};
use crate::domain::time_format::TimestampFormat;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("dataset contains no telemetry records")]
    EmptyDataset,
    #[error("timestamp {0} is outside the representable date range")]
    TimestampOutOfRange(i64),
}

/// Scan a dataset chronologically, emitting a [`FuelEvent`] for every rise in
/// fuel level between adjacent samples.
///
/// The consumption total is the sum of `previous - current` over every adjacent
/// pair, so a refuel contributes negatively. It is a net level change rather
/// than gross consumption and is kept that way deliberately.
pub fn analyze(
    mut records: Vec<TelemetryRecord>,
    format: TimestampFormat,
) -> Result<AnalysisResult, AnalysisError> {
    if records.is_empty() {
        return Err(AnalysisError::EmptyDataset);
    }

    sort_chronologically(&mut records);

    let mut fuel_events = Vec::new();
    let mut total_fuel_consumed = 0.0;
    let mut previous = &records[0];

    for current in &records[1..] {
        if current.fuel_level > previous.fuel_level {
            fuel_events.push(FuelEvent {
                start_time: format.format(previous.timestamp)?,
                end_time: format.format(current.timestamp)?,
                fuel_filed: current.fuel_level - previous.fuel_level,
                location: current.location.clone(),
            });
        }
        total_fuel_consumed += previous.fuel_level - current.fuel_level;
        previous = current;
    }

    tracing::debug!(
        records = records.len(),
        events = fuel_events.len(),
        total_fuel_consumed,
        "analyzed dataset"
    );

    Ok(AnalysisResult {
        fuel_events,
        total_fuel_consumed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn record(timestamp: i64, fuel_level: f64) -> TelemetryRecord {
        TelemetryRecord::new(timestamp, fuel_level, json!(format!("loc-{timestamp}")))
    }

    #[test]
    fn test_single_refuel_with_net_total() {
        let records = vec![record(1, 50.0), record(2, 40.0), record(3, 60.0), record(4, 55.0)];
        let result = analyze(records, TimestampFormat::EpochMillis).unwrap();

        assert_eq!(
            result.fuel_events,
            vec![FuelEvent {
                start_time: "2".to_string(),
                end_time: "3".to_string(),
                fuel_filed: 20.0,
                location: json!("loc-3"),
            }]
        );
        assert_eq!(result.total_fuel_consumed, -5.0);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let sorted = vec![record(1, 50.0), record(2, 40.0), record(3, 60.0), record(4, 55.0)];
        let shuffled = vec![record(3, 60.0), record(1, 50.0), record(4, 55.0), record(2, 40.0)];

        let a = analyze(sorted, TimestampFormat::Iso8601).unwrap();
        let b = analyze(shuffled.clone(), TimestampFormat::Iso8601).unwrap();
        let c = analyze(shuffled, TimestampFormat::Iso8601).unwrap();

        assert_eq!(a, b);
        assert_eq!(b, c);
        assert_eq!(a.fuel_events[0].start_time, "1970-01-01T00:00:00.002Z");
        assert_eq!(a.fuel_events[0].end_time, "1970-01-01T00:00:00.003Z");
    }

    #[test]
    fn test_strictly_decreasing_levels() {
        let records = vec![record(10, 100.0), record(30, 60.25), record(20, 80.5)];
        let result = analyze(records, TimestampFormat::Iso8601).unwrap();

        assert!(result.fuel_events.is_empty());
        assert_eq!(result.total_fuel_consumed, 100.0 - 60.25);
    }

    #[test]
    fn test_single_record() {
        let result = analyze(vec![record(7, 12.0)], TimestampFormat::Iso8601).unwrap();

        assert!(result.fuel_events.is_empty());
        assert_eq!(result.total_fuel_consumed, 0.0);
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(
            analyze(Vec::new(), TimestampFormat::Iso8601),
            Err(AnalysisError::EmptyDataset)
        );
    }

    #[test]
    fn test_refuel_only_dataset_has_negative_total() {
        let records = vec![record(1, 10.0), record(2, 30.0), record(3, 45.0)];
        let result = analyze(records, TimestampFormat::EpochMillis).unwrap();

        assert_eq!(result.fuel_events.len(), 2);
        assert_eq!(result.fuel_events[0].fuel_filed, 20.0);
        assert_eq!(result.fuel_events[1].fuel_filed, 15.0);
        assert_eq!(result.total_fuel_consumed, -35.0);
    }

    #[test]
    fn test_equal_levels_are_not_events() {
        let records = vec![record(1, 20.0), record(2, 20.0), record(3, 20.0)];
        let result = analyze(records, TimestampFormat::EpochMillis).unwrap();

        assert!(result.fuel_events.is_empty());
        assert_eq!(result.total_fuel_consumed, 0.0);
    }

    #[test]
    fn test_duplicate_timestamps_keep_input_order() {
        // Both samples at t=2 survive; the rise is measured against the later one in input order
        let records = vec![
            TelemetryRecord::new(2, 30.0, Value::Null),
            TelemetryRecord::new(1, 40.0, Value::Null),
            TelemetryRecord::new(2, 25.0, json!("second")),
            TelemetryRecord::new(3, 35.0, json!("pump")),
        ];
        let result = analyze(records, TimestampFormat::EpochMillis).unwrap();

        assert_eq!(result.fuel_events.len(), 1);
        assert_eq!(result.fuel_events[0].start_time, "2");
        assert_eq!(result.fuel_events[0].fuel_filed, 10.0);
        assert_eq!(result.fuel_events[0].location, json!("pump"));
        assert_eq!(result.total_fuel_consumed, 40.0 - 35.0);
    }

    #[test]
    fn test_unrenderable_timestamp_fails_whole_analysis() {
        let records = vec![record(1, 10.0), record(i64::MAX, 20.0)];
        assert_eq!(
            analyze(records, TimestampFormat::Iso8601),
            Err(AnalysisError::TimestampOutOfRange(i64::MAX))
        );
    }
}
