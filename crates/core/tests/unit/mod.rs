//! # Unit Components
//!
//! Tests grouped by the part of the simulator they exercise.

/// Hardware configuration: defaults, JSON decoding, validation.
pub mod config;

/// Simulator lifecycle: load, start, step, reset, mid-run guards.
pub mod lifecycle;

/// Program text parsing and error reporting.
pub mod parse;



/// Run statistics derived from the event stream.
pub mod stats;
