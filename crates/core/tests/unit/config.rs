//! # Configuration Tests
//!
//! JSON decoding, defaults, validation and clamping of the hardware
//! configuration.

use pretty_assertions::assert_eq;
use tomasim_core::config::{Latencies, StationCounts};
use tomasim_core::{ConfigError, FunctionalUnit, HardwareConfig, OpCode};

#[test]
fn test_default_station_counts() {
    let counts = StationCounts::default();
    assert_eq!(counts.get(FunctionalUnit::FpAdd), 3);
    assert_eq!(counts.get(FunctionalUnit::FpMult), 2);
    assert_eq!(counts.get(FunctionalUnit::IntAdd), 2);
    assert_eq!(counts.get(FunctionalUnit::IntMult), 2);
}

#[test]
fn test_default_latencies() {
    let lat = Latencies::default();
    let expected = [
        (OpCode::AddD, 2),
        (OpCode::SubD, 2),
        (OpCode::MulD, 10),
        (OpCode::DivD, 40),
        (OpCode::Add, 1),
        (OpCode::Sub, 1),
        (OpCode::Mul, 4),
        (OpCode::Div, 20),
    ];
    for (op, cycles) in expected {
        assert_eq!(lat.get(op), cycles, "{op}");
    }
}

#[test]
fn test_partial_json_fills_defaults() {
    let config = HardwareConfig::from_json(
        r#"{
            "stations": { "fp_add": 1, "int_mult": 4 },
            "latencies": { "fp_div": 12, "int_sub": 3 }
        }"#,
    )
    .unwrap();
    assert_eq!(config.stations.fp_add, 1);
    assert_eq!(config.stations.fp_mult, 2);
    assert_eq!(config.stations.int_mult, 4);
    assert_eq!(config.latencies.fp_div, 12);
    assert_eq!(config.latencies.int_sub, 3);
    assert_eq!(config.latencies.fp_mult, 10);
}

#[test]
fn test_json_round_trip_of_defaults() {
    let json = serde_json::to_string(&HardwareConfig::default()).unwrap();
    assert_eq!(
        HardwareConfig::from_json(&json).unwrap(),
        HardwareConfig::default()
    );
}

#[test]
fn test_range_boundaries() {
    let mut config = HardwareConfig::default();
    for unit in FunctionalUnit::ALL {
        config.stations.set(unit, 10);
    }
    for op in OpCode::ALL {
        config.latencies.set(op, 100);
    }
    assert!(config.validate().is_ok());

    config.latencies.set(OpCode::Sub, 0);
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "SUB latency 0 out of range (1..=100)");
}

#[test]
fn test_station_error_message() {
    let err = HardwareConfig::from_json(r#"{ "stations": { "fp_mult": 12 } }"#).unwrap_err();
    assert!(matches!(err, ConfigError::StationCount { count: 12, .. }));
    assert_eq!(
        err.to_string(),
        "FP_MULT station count 12 out of range (1..=10)"
    );
}

#[test]
fn test_clamped_is_idempotent_on_valid_config() {
    let config = HardwareConfig::default();
    assert_eq!(config.clamped(), config);
}
