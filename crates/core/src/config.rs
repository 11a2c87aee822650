//! Hardware configuration.
//!
//! This module defines the parameters of the simulated machine. It provides:
//! 1. **Defaults:** Baseline station counts and operation latencies.
//! 2. **Structures:** Per-unit station counts and per-operation latencies.
//! 3. **Validation:** Range checks, plus clamping for interactive front ends.
//!
//! Configuration is supplied as JSON (every field optional) or built with
//! `HardwareConfig::default()`.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::common::error::ConfigError;
use crate::isa::{FunctionalUnit, OpCode};

/// Default configuration constants for the simulator.
mod defaults {
    /// Floating-point adder reservation stations.
    pub const FP_ADD_STATIONS: usize = 3;

    /// Floating-point multiplier reservation stations.
    pub const FP_MULT_STATIONS: usize = 2;

    /// Integer adder reservation stations.
    pub const INT_ADD_STATIONS: usize = 2;

    /// Integer multiplier reservation stations.
    pub const INT_MULT_STATIONS: usize = 2;

    /// `ADD.D` latency in cycles.
    pub const FP_ADD_LATENCY: u32 = 2;

    /// `SUB.D` latency in cycles.
    pub const FP_SUB_LATENCY: u32 = 2;

    /// `MUL.D` latency in cycles.
    pub const FP_MULT_LATENCY: u32 = 10;

    /// `DIV.D` latency in cycles.
    ///
    /// Division dominates runtime in the demo programs, matching the classic
    /// textbook machine.
    pub const FP_DIV_LATENCY: u32 = 40;

    /// `ADD` latency in cycles.
    pub const INT_ADD_LATENCY: u32 = 1;

    /// `SUB` latency in cycles.
    pub const INT_SUB_LATENCY: u32 = 1;

    /// `MUL` latency in cycles.
    pub const INT_MULT_LATENCY: u32 = 4;

    /// `DIV` latency in cycles.
    pub const INT_DIV_LATENCY: u32 = 20;
}

/// Allowed number of reservation stations per functional unit.
pub const STATION_RANGE: RangeInclusive<usize> = 1..=10;

/// Allowed latency, in cycles, for any operation.
pub const LATENCY_RANGE: RangeInclusive<u32> = 1..=100;

/// Root hardware configuration.
///
/// # Examples
///
/// ```
/// use tomasim_core::config::HardwareConfig;
/// use tomasim_core::isa::{FunctionalUnit, OpCode};
///
/// let config = HardwareConfig::from_json(r#"{
///     "stations": { "fp_mult": 1 },
///     "latencies": { "fp_mult": 6 }
/// }"#).unwrap();
/// assert_eq!(config.stations.get(FunctionalUnit::FpMult), 1);
/// assert_eq!(config.stations.get(FunctionalUnit::FpAdd), 3);
/// assert_eq!(config.latencies.get(OpCode::MulD), 6);
/// assert_eq!(config.latencies.get(OpCode::DivD), 40);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Reservation stations per functional unit.
    #[serde(default)]
    pub stations: StationCounts,
    /// Execution latency per operation.
    #[serde(default)]
    pub latencies: Latencies,
}

impl HardwareConfig {
    /// Decodes and validates a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every count and latency against its allowed range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for unit in FunctionalUnit::ALL {
            let count = self.stations.get(unit);
            if !STATION_RANGE.contains(&count) {
                return Err(ConfigError::StationCount { unit, count });
            }
        }
        for op in OpCode::ALL {
            let latency = self.latencies.get(op);
            if !LATENCY_RANGE.contains(&latency) {
                return Err(ConfigError::Latency { op, latency });
            }
        }
        Ok(())
    }

    /// Returns a copy with every value clamped into its allowed range.
    #[must_use]
    pub fn clamped(&self) -> Self {
        let mut out = self.clone();
        for unit in FunctionalUnit::ALL {
            let count = self
                .stations
                .get(unit)
                .clamp(*STATION_RANGE.start(), *STATION_RANGE.end());
            out.stations.set(unit, count);
        }
        for op in OpCode::ALL {
            let latency = self
                .latencies
                .get(op)
                .clamp(*LATENCY_RANGE.start(), *LATENCY_RANGE.end());
            out.latencies.set(op, latency);
        }
        out
    }
}

/// Number of reservation stations attached to each functional unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationCounts {
    /// Floating-point adder stations (`Add1`..).
    #[serde(default = "StationCounts::default_fp_add")]
    pub fp_add: usize,
    /// Floating-point multiplier stations (`Mult1`..).
    #[serde(default = "StationCounts::default_fp_mult")]
    pub fp_mult: usize,
    /// Integer adder stations (`IntAdd1`..).
    #[serde(default = "StationCounts::default_int_add")]
    pub int_add: usize,
    /// Integer multiplier stations (`IntMult1`..).
    #[serde(default = "StationCounts::default_int_mult")]
    pub int_mult: usize,
}

impl StationCounts {
    const fn default_fp_add() -> usize {
        defaults::FP_ADD_STATIONS
    }

    const fn default_fp_mult() -> usize {
        defaults::FP_MULT_STATIONS
    }

    const fn default_int_add() -> usize {
        defaults::INT_ADD_STATIONS
    }

    const fn default_int_mult() -> usize {
        defaults::INT_MULT_STATIONS
    }

    /// Station count for `unit`.
    pub const fn get(&self, unit: FunctionalUnit) -> usize {
        match unit {
            FunctionalUnit::FpAdd => self.fp_add,
            FunctionalUnit::FpMult => self.fp_mult,
            FunctionalUnit::IntAdd => self.int_add,
            FunctionalUnit::IntMult => self.int_mult,
        }
    }

    /// Sets the station count for `unit`.
    pub const fn set(&mut self, unit: FunctionalUnit, count: usize) {
        match unit {
            FunctionalUnit::FpAdd => self.fp_add = count,
            FunctionalUnit::FpMult => self.fp_mult = count,
            FunctionalUnit::IntAdd => self.int_add = count,
            FunctionalUnit::IntMult => self.int_mult = count,
        }
    }

    /// Total number of stations across all units.
    pub const fn total(&self) -> usize {
        self.fp_add + self.fp_mult + self.int_add + self.int_mult
    }
}

impl Default for StationCounts {
    fn default() -> Self {
        Self {
            fp_add: defaults::FP_ADD_STATIONS,
            fp_mult: defaults::FP_MULT_STATIONS,
            int_add: defaults::INT_ADD_STATIONS,
            int_mult: defaults::INT_MULT_STATIONS,
        }
    }
}

/// Execution latency, in cycles, of each operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Latencies {
    /// `ADD.D`
    #[serde(default = "Latencies::default_fp_add")]
    pub fp_add: u32,
    /// `SUB.D`
    #[serde(default = "Latencies::default_fp_sub")]
    pub fp_sub: u32,
    /// `MUL.D`
    #[serde(default = "Latencies::default_fp_mult")]
    pub fp_mult: u32,
    /// `DIV.D`
    #[serde(default = "Latencies::default_fp_div")]
    pub fp_div: u32,
    /// `ADD`
    #[serde(default = "Latencies::default_int_add")]
    pub int_add: u32,
    /// `SUB`
    #[serde(default = "Latencies::default_int_sub")]
    pub int_sub: u32,
    /// `MUL`
    #[serde(default = "Latencies::default_int_mult")]
    pub int_mult: u32,
    /// `DIV`
    #[serde(default = "Latencies::default_int_div")]
    pub int_div: u32,
}

impl Latencies {
    const fn default_fp_add() -> u32 {
        defaults::FP_ADD_LATENCY
    }

    const fn default_fp_sub() -> u32 {
        defaults::FP_SUB_LATENCY
    }

    const fn default_fp_mult() -> u32 {
        defaults::FP_MULT_LATENCY
    }

    const fn default_fp_div() -> u32 {
        defaults::FP_DIV_LATENCY
    }

    const fn default_int_add() -> u32 {
        defaults::INT_ADD_LATENCY
    }

    const fn default_int_sub() -> u32 {
        defaults::INT_SUB_LATENCY
    }

    const fn default_int_mult() -> u32 {
        defaults::INT_MULT_LATENCY
    }

    const fn default_int_div() -> u32 {
        defaults::INT_DIV_LATENCY
    }

    /// Latency of `op`.
    pub const fn get(&self, op: OpCode) -> u32 {
        match op {
            OpCode::AddD => self.fp_add,
            OpCode::SubD => self.fp_sub,
            OpCode::MulD => self.fp_mult,
            OpCode::DivD => self.fp_div,
            OpCode::Add => self.int_add,
            OpCode::Sub => self.int_sub,
            OpCode::Mul => self.int_mult,
            OpCode::Div => self.int_div,
        }
    }

    /// Sets the latency of `op`.
    pub const fn set(&mut self, op: OpCode, latency: u32) {
        match op {
            OpCode::AddD => self.fp_add = latency,
            OpCode::SubD => self.fp_sub = latency,
            OpCode::MulD => self.fp_mult = latency,
            OpCode::DivD => self.fp_div = latency,
            OpCode::Add => self.int_add = latency,
            OpCode::Sub => self.int_sub = latency,
            OpCode::Mul => self.int_mult = latency,
            OpCode::Div => self.int_div = latency,
        }
    }
}

impl Default for Latencies {
    fn default() -> Self {
        Self {
            fp_add: defaults::FP_ADD_LATENCY,
            fp_sub: defaults::FP_SUB_LATENCY,
            fp_mult: defaults::FP_MULT_LATENCY,
            fp_div: defaults::FP_DIV_LATENCY,
            int_add: defaults::INT_ADD_LATENCY,
            int_sub: defaults::INT_SUB_LATENCY,
            int_mult: defaults::INT_MULT_LATENCY,
            int_div: defaults::INT_DIV_LATENCY,
        }
    }
}
