//! Machine state snapshot.
//!
//! A `MachineState` is everything the cycle engine reads and writes: the
//! instruction stream with its timing stamps, the reservation stations, both
//! register files, both register status tables and the issue pointer. The
//! engine never mutates a snapshot it was handed; it clones it and returns
//! the successor, so observers can hold on to any past cycle.

use serde::{Deserialize, Serialize};

use crate::common::reg::RegClass;
use crate::config::HardwareConfig;
use crate::isa::Instruction;

use super::pool::StationPool;
use super::regfile::RegisterFile;
use super::status::RegisterStatus;

/// Complete architectural and microarchitectural state at a cycle boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineState {
    /// Program in order, with timing stamps.
    pub instructions: Vec<Instruction>,
    /// Reservation stations.
    pub stations: StationPool,
    /// Floating-point register file.
    pub fp_regs: RegisterFile,
    /// Integer register file.
    pub int_regs: RegisterFile,
    /// Floating-point register status table.
    pub fp_status: RegisterStatus,
    /// Integer register status table.
    pub int_status: RegisterStatus,
    /// Position of the next instruction to issue.
    pub issue_ptr: usize,
}

impl MachineState {
    /// Creates the cycle-0 state with preset register values.
    pub fn new(instructions: Vec<Instruction>, config: &HardwareConfig) -> Self {
        Self::with_registers(
            instructions,
            config,
            RegisterFile::with_defaults(RegClass::Float),
            RegisterFile::with_defaults(RegClass::Int),
        )
    }

    /// Creates the cycle-0 state with the given register files.
    ///
    /// Timing stamps on `instructions` are cleared.
    pub fn with_registers(
        mut instructions: Vec<Instruction>,
        config: &HardwareConfig,
        fp_regs: RegisterFile,
        int_regs: RegisterFile,
    ) -> Self {
        instructions.iter_mut().for_each(Instruction::reset_timing);
        Self {
            instructions,
            stations: StationPool::new(&config.stations),
            fp_regs,
            int_regs,
            fp_status: RegisterStatus::new(),
            int_status: RegisterStatus::new(),
            issue_ptr: 0,
        }
    }

    /// Register file for `class`.
    pub const fn regs(&self, class: RegClass) -> &RegisterFile {
        match class {
            RegClass::Float => &self.fp_regs,
            RegClass::Int => &self.int_regs,
        }
    }

    /// Mutable register file for `class`.
    pub const fn regs_mut(&mut self, class: RegClass) -> &mut RegisterFile {
        match class {
            RegClass::Float => &mut self.fp_regs,
            RegClass::Int => &mut self.int_regs,
        }
    }

    /// Register status table for `class`.
    pub const fn status(&self, class: RegClass) -> &RegisterStatus {
        match class {
            RegClass::Float => &self.fp_status,
            RegClass::Int => &self.int_status,
        }
    }

    /// Register file and status table for `class`, borrowed together.
    pub const fn files_mut(&mut self, class: RegClass) -> (&mut RegisterFile, &mut RegisterStatus) {
        match class {
            RegClass::Float => (&mut self.fp_regs, &mut self.fp_status),
            RegClass::Int => (&mut self.int_regs, &mut self.int_status),
        }
    }

    /// Instruction with sequence id `id`.
    pub fn instruction(&self, id: u32) -> Option<&Instruction> {
        self.instructions.iter().find(|inst| inst.id == id)
    }

    /// Mutable instruction with sequence id `id`.
    pub fn instruction_mut(&mut self, id: u32) -> Option<&mut Instruction> {
        self.instructions.iter_mut().find(|inst| inst.id == id)
    }

    /// Number of instructions whose result has been written.
    pub fn retired(&self) -> usize {
        self.instructions
            .iter()
            .filter(|inst| inst.timing.write.is_some())
            .count()
    }

    /// Every instruction has written its result and every station is free.
    ///
    /// An empty program is never complete.
    pub fn is_complete(&self) -> bool {
        !self.instructions.is_empty()
            && self.retired() == self.instructions.len()
            && self.stations.is_idle()
    }
}
