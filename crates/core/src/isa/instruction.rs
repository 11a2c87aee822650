//! Decoded instructions and their timing stamps.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Cycle;
use crate::common::reg::Reg;

use super::op::OpCode;

/// Cycle stamps recorded as an instruction moves through the machine.
///
/// Each stamp is written at most once, in the order issue, execution start,
/// execution end, write result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Timing {
    /// Cycle the instruction was placed in a reservation station.
    pub issued: Option<Cycle>,
    /// First cycle of execution.
    pub exec_start: Option<Cycle>,
    /// Last cycle of execution (remaining latency reached zero).
    pub exec_end: Option<Cycle>,
    /// Cycle the result was broadcast on the common data bus.
    pub write: Option<Cycle>,
}

impl Timing {
    /// Sets `slot` to `cycle` unless it is already stamped.
    fn stamp(slot: &mut Option<Cycle>, cycle: Cycle) {
        if slot.is_none() {
            *slot = Some(cycle);
        }
    }

    /// Records the issue cycle.
    pub fn stamp_issue(&mut self, cycle: Cycle) {
        Self::stamp(&mut self.issued, cycle);
    }

    /// Records the first execution cycle.
    pub fn stamp_exec_start(&mut self, cycle: Cycle) {
        Self::stamp(&mut self.exec_start, cycle);
    }

    /// Records the last execution cycle.
    pub fn stamp_exec_end(&mut self, cycle: Cycle) {
        Self::stamp(&mut self.exec_end, cycle);
    }

    /// Records the write-result cycle.
    pub fn stamp_write(&mut self, cycle: Cycle) {
        Self::stamp(&mut self.write, cycle);
    }
}

/// Progress of an instruction, derived from its timing stamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstructionStatus {
    /// Not yet issued.
    Pending,
    /// Sitting in a reservation station, not yet executing.
    Issued,
    /// Executing on its functional unit.
    Executing,
    /// Finished executing, waiting to broadcast.
    Executed,
    /// Result written; the instruction has retired.
    Written,
}

/// A decoded instruction: `OP DEST, SRC1, SRC2` plus timing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instruction {
    /// 1-based position in program order.
    pub id: u32,
    /// Operation.
    pub op: OpCode,
    /// Destination register.
    pub dest: Reg,
    /// First source register.
    pub src1: Reg,
    /// Second source register.
    pub src2: Reg,
    /// Cycle stamps filled in by the engine.
    #[serde(default)]
    pub timing: Timing,
}

impl Instruction {
    /// Creates an instruction with cleared timing.
    pub fn new(id: u32, op: OpCode, dest: Reg, src1: Reg, src2: Reg) -> Self {
        Self {
            id,
            op,
            dest,
            src1,
            src2,
            timing: Timing::default(),
        }
    }

    /// Clears every timing stamp, returning the instruction to decode-only state.
    pub fn reset_timing(&mut self) {
        self.timing = Timing::default();
    }

    /// Current progress derived from the timing stamps.
    pub const fn status(&self) -> InstructionStatus {
        let t = &self.timing;
        if t.write.is_some() {
            InstructionStatus::Written
        } else if t.exec_end.is_some() {
            InstructionStatus::Executed
        } else if t.exec_start.is_some() {
            InstructionStatus::Executing
        } else if t.issued.is_some() {
            InstructionStatus::Issued
        } else {
            InstructionStatus::Pending
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}, {}, {}", self.op, self.dest, self.src1, self.src2)
    }
}
