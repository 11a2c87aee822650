//! Tomasulo scheduling core.
//!
//! This module contains the machine model and the cycle engine that drives
//! it: reservation stations, register files, register status tables, the
//! snapshot type that bundles them, and the three per-cycle phases.

/// Pure one-cycle state transition.
pub mod engine;

/// Reservation station pool (allocation, release, result broadcast).
pub mod pool;

/// Architectural register files.
pub mod regfile;

/// Write-result, execute and issue phases.
pub mod stages;

/// Machine state snapshot.
pub mod state;

/// Reservation station and operand types.
pub mod station;

/// Register status tables (register renaming).
pub mod status;

pub use self::engine::{Step, advance};
pub use self::pool::StationPool;
pub use self::regfile::RegisterFile;
pub use self::state::MachineState;
pub use self::station::{InvalidStationName, Operand, ReservationStation, StationEntry, StationId};
pub use self::status::RegisterStatus;
