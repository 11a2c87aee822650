//! Simulation statistics collection and reporting.
//!
//! This module tracks what the scheduler did over a run. It provides:
//! 1. **Per-cycle activity:** Counters filled in by the pipeline stages.
//! 2. **Run totals:** Cycles, issued and retired instructions, and IPC.
//! 3. **Hazards:** Structural stall cycles and RAW wait station-cycles.
//! 4. **Common data bus:** Broadcasts, forwarded operands and writes
//!    suppressed because a newer instruction renamed the destination.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::Cycle;

/// What happened in a single cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleActivity {
    /// An instruction was issued.
    pub issued: bool,
    /// The next instruction could not issue because its unit was full.
    pub structural_stall: bool,
    /// Stations left waiting on an operand during execute.
    pub raw_waits: u32,
    /// Stations that began executing.
    pub executions_started: u32,
    /// Results broadcast on the common data bus.
    pub broadcasts: u32,
    /// Operands captured from those broadcasts.
    pub forwarded_operands: u32,
    /// Broadcasts that did not update the register file.
    pub suppressed_writes: u32,
}

/// Totals accumulated over a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimStats {
    /// Cycles simulated.
    pub cycles: Cycle,
    /// Instructions issued.
    pub issued: u64,
    /// Instructions whose result was written.
    pub retired: u64,
    /// Cycles in which issue stalled on a full unit.
    pub structural_stalls: u64,
    /// Sum over cycles of stations waiting on operands.
    pub raw_wait_cycles: u64,
    /// Operands delivered over the common data bus.
    pub forwarded_operands: u64,
    /// Results dropped by the register-file WAW guard.
    pub suppressed_writes: u64,
}

impl SimStats {
    /// Folds one cycle's activity into the totals.
    pub fn record(&mut self, activity: &CycleActivity) {
        self.cycles += 1;
        self.issued += u64::from(activity.issued);
        self.retired += u64::from(activity.broadcasts);
        self.structural_stalls += u64::from(activity.structural_stall);
        self.raw_wait_cycles += u64::from(activity.raw_waits);
        self.forwarded_operands += u64::from(activity.forwarded_operands);
        self.suppressed_writes += u64::from(activity.suppressed_writes);
    }

    /// Retired instructions per cycle; zero before the first cycle.
    pub fn ipc(&self) -> f64 {
        if self.cycles == 0 {
            0.0
        } else {
            self.retired as f64 / self.cycles as f64
        }
    }
}

impl fmt::Display for SimStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "==========================================================")?;
        writeln!(f, "TOMASULO SCHEDULING STATISTICS")?;
        writeln!(f, "==========================================================")?;
        writeln!(f, "sim_cycles               {}", self.cycles)?;
        writeln!(f, "sim_insts.issued         {}", self.issued)?;
        writeln!(f, "sim_insts.retired        {}", self.retired)?;
        writeln!(f, "sim_ipc                  {:.4}", self.ipc())?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "HAZARDS")?;
        writeln!(f, "  stalls.structural      {}", self.structural_stalls)?;
        writeln!(f, "  waits.raw              {}", self.raw_wait_cycles)?;
        writeln!(f, "----------------------------------------------------------")?;
        writeln!(f, "COMMON DATA BUS")?;
        writeln!(f, "  cdb.forwarded          {}", self.forwarded_operands)?;
        writeln!(f, "  cdb.suppressed_writes  {}", self.suppressed_writes)?;
        write!(f, "==========================================================")
    }
}
