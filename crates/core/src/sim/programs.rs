//! Built-in demonstration programs.

use crate::common::error::ParseError;
use crate::isa::{Instruction, parse_program};

/// A named example program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoProgram {
    /// Lookup name, e.g. `raw_hazard`.
    pub name: &'static str,
    /// One-line summary of what the program shows.
    pub description: &'static str,
    /// Assembly text.
    pub source: &'static str,
}

impl DemoProgram {
    /// Parses the program text.
    pub fn instructions(&self) -> Result<Vec<Instruction>, ParseError> {
        parse_program(self.source)
    }
}

/// Every built-in program, in presentation order.
pub const DEMOS: &[DemoProgram] = &[
    DemoProgram {
        name: "basic",
        description: "Textbook FP sequence with RAW, WAR and WAW dependencies",
        source: "MUL.D F0, F2, F4
ADD.D F6, F0, F8
SUB.D F8, F10, F14
DIV.D F10, F0, F6
ADD.D F6, F8, F2",
    },
    DemoProgram {
        name: "raw_hazard",
        description: "Chain of read-after-write dependencies resolved by forwarding",
        source: "ADD.D F2, F0, F4
MUL.D F6, F2, F8
ADD.D F10, F6, F12",
    },
    DemoProgram {
        name: "waw_hazard",
        description: "Slow producer overtaken by a younger write to the same register",
        source: "MUL.D F0, F2, F4
ADD.D F0, F6, F8",
    },
    DemoProgram {
        name: "integer_ops",
        description: "Dependent integer add, multiply and subtract",
        source: "ADD R1, R2, R3
MUL R4, R1, R5
SUB R6, R4, R7",
    },
    DemoProgram {
        name: "mixed",
        description: "Interleaved FP and integer streams sharing the issue slot",
        source: "MUL.D F0, F2, F4
ADD R1, R2, R3
ADD.D F6, F0, F8
MUL R4, R1, R5",
    },
];

/// Looks up a built-in program by name.
pub fn demo(name: &str) -> Option<&'static DemoProgram> {
    DEMOS.iter().find(|d| d.name.eq_ignore_ascii_case(name))
}
