//! Common types shared across the simulator.
//!
//! This module provides the fundamental building blocks used by every other
//! component. It includes:
//! 1. **Registers:** Register names split into floating-point and integer files.
//! 2. **Values:** Register contents (`f64` for the FP file, `i64` for the integer file).
//! 3. **Error Handling:** Parse, configuration and lifecycle errors.

/// Error types for parsing, configuration and simulator lifecycle.
pub mod error;

/// Register names and register values.
pub mod reg;

pub use error::{ConfigError, ParseError, ParseErrorKind, SimError};
pub use reg::{Reg, RegClass, Value};

/// A simulated clock cycle. Cycle 0 is the state before the first `advance`.
pub type Cycle = u64;
