// Telemetry data domain models
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One fuel-level sample reported by a vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Epoch milliseconds; the ordering key
    pub timestamp: i64,
    pub fuel_level: f64,
    /// Carried through unchanged, never interpreted
    #[serde(default)]
    pub location: Value,
}

impl TelemetryRecord {
    pub fn new(timestamp: i64, fuel_level: f64, location: Value) -> Self {
        Self {
            timestamp,
            fuel_level,
            location,
        }
    }
}

/// Decode a stored dataset (a JSON array of records)
pub fn decode_records(bytes: &[u8]) -> Result<Vec<TelemetryRecord>, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Stable ascending sort by timestamp. Records sharing a timestamp keep
/// their original array position.
pub fn sort_chronologically(records: &mut [TelemetryRecord]) {
    records.sort_by_key(|r| r.timestamp);
}

/// A detected rise in fuel level between two adjacent samples.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuelEvent {
    pub start_time: String,
    pub end_time: String,
    pub fuel_filed: f64,
    pub location: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    #[serde(rename = "fuelEvents")]
    pub fuel_events: Vec<FuelEvent>,
    /// Net level decrease over the dataset; refuels count as negative consumption
    #[serde(rename = "totalFuelConsumed")]
    pub total_fuel_consumed: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_records() {
        let bytes = br#"[
            {"timestamp": 2, "fuel_level": 40.5, "location": {"lat": 1.0, "lng": 2.0}},
            {"timestamp": 1, "fuel_level": 50}
        ]"#;
        let records = decode_records(bytes).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].location, json!({"lat": 1.0, "lng": 2.0}));
        assert_eq!(records[1].fuel_level, 50.0);
        assert_eq!(records[1].location, Value::Null);
    }

    #[test]
    fn test_decode_rejects_missing_or_non_numeric_fields() {
        assert!(decode_records(br#"[{"fuel_level": 10}]"#).is_err());
        assert!(decode_records(br#"[{"timestamp": 1}]"#).is_err());
        assert!(decode_records(br#"[{"timestamp": 1, "fuel_level": "full"}]"#).is_err());
        assert!(decode_records(br#"{"timestamp": 1, "fuel_level": 3}"#).is_err());
    }

    #[test]
    fn test_sort_is_stable_for_equal_timestamps() {
        let mut records = vec![
            TelemetryRecord::new(5, 1.0, json!("a")),
            TelemetryRecord::new(3, 2.0, json!("b")),
            TelemetryRecord::new(5, 3.0, json!("c")),
            TelemetryRecord::new(3, 4.0, json!("d")),
        ];
        sort_chronologically(&mut records);

        let order: Vec<&Value> = records.iter().map(|r| &r.location).collect();
        assert_eq!(order, vec![&json!("b"), &json!("d"), &json!("a"), &json!("c")]);
    }

    #[test]
    fn test_analysis_result_wire_names() {
        let result = AnalysisResult {
            fuel_events: vec![FuelEvent {
                start_time: "s".to_string(),
                end_time: "e".to_string(),
                fuel_filed: 20.0,
                location: json!("depot"),
            }],
            total_fuel_consumed: -5.0,
        };

        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "fuelEvents": [
                    {"start_time": "s", "end_time": "e", "fuel_filed": 20.0, "location": "depot"}
                ],
                "totalFuelConsumed": -5.0
            })
        );
    }
}
