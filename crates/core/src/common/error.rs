//! Error definitions.
//!
//! The scheduling engine itself never fails: structural and RAW hazards are
//! ordinary scheduling states reported through the event log, and division
//! by zero yields zero. The errors here belong to the collaborators around
//! the engine:
//! 1. **Parsing:** Rejected program lines, with the offending line number.
//! 2. **Configuration:** Station counts or latencies outside the supported range.
//! 3. **Lifecycle:** Caller contract violations such as reconfiguring mid-run.

use thiserror::Error;

use crate::config::{LATENCY_RANGE, STATION_RANGE};
use crate::isa::{FunctionalUnit, OpCode};

use super::Cycle;

/// Reason a single program line was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// The line does not have the shape `OP DEST, SRC1, SRC2`.
    #[error("expected `OP DEST, SRC1, SRC2`, found {found} token(s)")]
    Malformed {
        /// Number of tokens found after stripping commas and comments.
        found: usize,
    },

    /// The mnemonic is not one of the eight supported operations.
    #[error("unknown operation `{0}`")]
    UnknownOpcode(String),

    /// The token is not a register name.
    #[error("invalid register `{0}`")]
    InvalidRegister(String),

    /// The register index does not fit the register file.
    #[error("register index out of range in `{0}`")]
    RegisterOutOfRange(String),

    /// A floating-point operation named an integer register or vice versa.
    #[error("register `{reg}` cannot be used with `{op}`")]
    WrongRegisterClass {
        /// Operation on the line.
        op: OpCode,
        /// Register as written.
        reg: String,
    },
}

/// A rejected program line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based source line number.
    pub line: usize,
    /// What was wrong with the line.
    pub kind: ParseErrorKind,
}

/// Invalid hardware configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Station count outside the supported range.
    #[error(
        "{unit} station count {count} out of range ({min}..={max})",
        min = STATION_RANGE.start(),
        max = STATION_RANGE.end()
    )]
    StationCount {
        /// Functional unit whose count is wrong.
        unit: FunctionalUnit,
        /// Requested count.
        count: usize,
    },

    /// Latency outside the supported range.
    #[error(
        "{op} latency {latency} out of range ({min}..={max})",
        min = LATENCY_RANGE.start(),
        max = LATENCY_RANGE.end()
    )]
    Latency {
        /// Operation whose latency is wrong.
        op: OpCode,
        /// Requested latency in cycles.
        latency: u32,
    },

    /// The configuration document could not be decoded.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Simulator lifecycle error.
#[derive(Debug, Error)]
pub enum SimError {
    /// Configuration, station rebuild or register edits were requested while
    /// a run is in progress.
    #[error("cannot {0} while a simulation is running; reset first")]
    RunInProgress(&'static str),

    /// `start` was called without a loaded program.
    #[error("no program loaded")]
    EmptyProgram,

    /// `run` hit its cycle bound before every instruction retired.
    #[error("simulation did not complete within {0} cycles")]
    CycleLimit(Cycle),

    /// Program text was rejected.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Hardware configuration was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
