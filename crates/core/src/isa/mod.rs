//! Instruction set.
//!
//! This module defines the instruction stream the scheduler issues from. It includes:
//! 1. **Operations:** The eight arithmetic op codes and their functional units.
//! 2. **Instructions:** Decoded `OP DEST, SRC1, SRC2` records with timing stamps.
//! 3. **Parsing:** Program text to instruction list.

/// Decoded instructions and timing stamps.
pub mod instruction;

/// Operation codes, functional units and result computation.
pub mod op;

/// Program text parser.
pub mod parse;

pub use instruction::{Instruction, InstructionStatus, Timing};
pub use op::{FunctionalUnit, OpCode};
pub use parse::{parse_line, parse_program};
