//! Tomasulo out-of-order scheduling simulator library.
//!
//! This crate models a Tomasulo-style machine at cycle granularity with the following:
//! 1. **ISA:** Eight arithmetic operations over a floating-point and an integer register file.
//! 2. **Core:** Reservation stations, register renaming through status tables, and a
//!    common data bus, driven by a pure one-cycle engine.
//! 3. **Simulation:** A stateful driver with start/step/run/reset, built-in demo programs,
//!    an event log and run statistics.
//! 4. **Configuration:** Station counts and latencies, loadable from JSON.
//!
//! # Examples
//!
//! ```
//! use tomasim_core::{HardwareConfig, Reg, Simulator, Value};
//!
//! let mut sim = Simulator::new(HardwareConfig::default()).unwrap();
//! sim.load_source("MUL.D F0, F2, F4\nADD.D F6, F0, F8").unwrap();
//! let cycles = sim.run(1_000).unwrap();
//!
//! assert_eq!(cycles, 14);
//! assert_eq!(sim.state().fp_regs.read(Reg::fp(6)), Value::Float(16.0));
//! ```

/// Common types (registers, values, cycles, errors).
pub mod common;
/// Hardware configuration (defaults, station counts, latencies).
pub mod config;
/// Scheduling core (stations, register status, cycle engine).
pub mod core;
/// Instruction set (op codes, instructions, parser).
pub mod isa;
/// Simulator lifecycle and demo programs.
pub mod sim;
/// Run statistics.
pub mod stats;
/// Cycle-tagged event log.
pub mod trace;

/// Register names and values.
pub use crate::common::{Cycle, Reg, RegClass, Value};
/// Library error types.
pub use crate::common::{ConfigError, ParseError, ParseErrorKind, SimError};
/// Root configuration type; use `HardwareConfig::default()` or deserialize from JSON.
pub use crate::config::HardwareConfig;
/// Decoded instruction and operation types.
pub use crate::isa::{FunctionalUnit, Instruction, OpCode};
/// Stateful simulator driving the cycle engine.
pub use crate::sim::Simulator;
/// Event log entries.
pub use crate::trace::{Event, EventKind};
