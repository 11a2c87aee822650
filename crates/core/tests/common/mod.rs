//! Shared test infrastructure.

/// Simulator test harness.
pub mod harness;

/// In-order reference interpreter.
pub mod reference;
