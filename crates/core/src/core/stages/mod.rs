//! Cycle engine phases.
//!
//! Each cycle runs three phases in a fixed order. It includes:
//! 1. **Write result:** Finished stations broadcast on the common data bus,
//!    update the register file if they still own the destination, and free
//!    themselves.
//! 2. **Execute:** Executing stations count down their latency; ready
//!    stations begin executing; the rest report what they wait on.
//! 3. **Issue:** The next instruction in program order takes a free station
//!    and renames its destination.
//!
//! Running write result first lets a station freed this cycle accept a new
//! instruction in the same cycle, and lets a broadcast operand start
//! executing in the same cycle it arrives.

use crate::common::Cycle;
use crate::isa::{Instruction, Timing};
use crate::stats::CycleActivity;
use crate::trace::{EventKind, EventLog};

/// Execute phase implementation.
pub mod execute;

/// Issue phase implementation.
pub mod issue;

/// Write-result phase implementation.
pub mod writeback;

/// Execute phase entry point.
pub use execute::execute_stage;
/// Issue phase entry point.
pub use issue::issue_stage;
/// Write-result phase entry point.
pub use writeback::writeback_stage;

/// Events and counters produced while running one cycle's phases.
#[derive(Debug, Clone, Default)]
pub struct StageOutput {
    /// Cycle being simulated.
    pub cycle: Cycle,
    /// Events in phase order.
    pub log: EventLog,
    /// Counters for statistics.
    pub activity: CycleActivity,
}

impl StageOutput {
    /// Creates an empty output for `cycle`.
    pub fn new(cycle: Cycle) -> Self {
        Self {
            cycle,
            ..Self::default()
        }
    }

    /// Records an event for the current cycle.
    pub fn emit(&mut self, kind: EventKind, message: impl Into<String>) {
        self.log.record(self.cycle, kind, message);
    }
}

/// Timing stamps of the instruction with sequence id `id`.
fn timing_mut(instructions: &mut [Instruction], id: u32) -> Option<&mut Timing> {
    instructions
        .iter_mut()
        .find(|inst| inst.id == id)
        .map(|inst| &mut inst.timing)
}
