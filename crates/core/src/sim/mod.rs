//! Simulation driver and built-in programs.
//!
//! Provides the stateful simulator front ends drive cycle by cycle, and the
//! demonstration programs used by the CLI and the tests.

/// Built-in demonstration programs.
pub mod programs;

/// Program and configuration lifecycle around the cycle engine.
pub mod simulator;

pub use programs::{DEMOS, DemoProgram, demo};
pub use simulator::{DEFAULT_MAX_CYCLES, Simulator};
