//! Serialization of configuration and metadata.

#![cfg(feature = "serde")]

use pretty_assertions::assert_eq;
use proxopt_core::prelude::*;
use std::time::Duration;

#[test]
fn test_config_json() {
    let config = OptimizerConfig::<f64>::new()
        .with_max_iter(120)
        .with_tolerance(1e-5)
        .with_penalty(PenaltySchedule::from_tau(5.0, 2.0, 3.0))
        .with_verbosity(Verbosity::Summary);

    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"max_iter\":120"));
    assert!(json.contains("\"Summary\""));

    let back: OptimizerConfig<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

#[test]
fn test_metadata_table_json() {
    let mut tracker = ConvergenceTracker::new();
    tracker.record(0.5, 0.25, 10.0_f64, Some(3.0), Duration::from_millis(2));
    tracker.record(0.1, 0.05, 5.0, None, Duration::from_millis(4));
    let table = tracker.finish();

    let value = serde_json::to_value(&table).unwrap();
    let rows = value["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["iteration"], 1);
    assert_eq!(rows[1]["objective"], serde_json::Value::Null);

    let back: MetadataTable<f64> = serde_json::from_value(value).unwrap();
    assert_eq!(back, table);
}
