//! Program text parser.
//!
//! Accepts one instruction per line in the form `OP DEST, SRC1, SRC2`.
//! Operands may be separated by commas, whitespace or both, mnemonics and
//! register names are case-insensitive, and everything after a `;` is a
//! comment. Blank and comment-only lines are skipped without consuming an
//! instruction id.

use crate::common::error::{ParseError, ParseErrorKind};
use crate::common::reg::Reg;

use super::instruction::Instruction;
use super::op::OpCode;

/// Parses a whole program. Instruction ids are assigned 1, 2, ... over the
/// accepted lines.
///
/// # Errors
///
/// Returns the first rejected line, with its 1-based line number.
pub fn parse_program(text: &str) -> Result<Vec<Instruction>, ParseError> {
    let mut instructions = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        let id = instructions.len() as u32 + 1;
        match parse_line(line, id) {
            Ok(Some(inst)) => instructions.push(inst),
            Ok(None) => {}
            Err(kind) => {
                return Err(ParseError {
                    line: line_no + 1,
                    kind,
                });
            }
        }
    }
    Ok(instructions)
}

/// Parses a single line. Returns `Ok(None)` for blank or comment-only lines.
pub fn parse_line(line: &str, id: u32) -> Result<Option<Instruction>, ParseErrorKind> {
    let code = line.split(';').next().unwrap_or_default().trim();
    if code.is_empty() {
        return Ok(None);
    }

    let tokens: Vec<&str> = code
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    let &[op, dest, src1, src2] = tokens.as_slice() else {
        return Err(ParseErrorKind::Malformed {
            found: tokens.len(),
        });
    };

    let op: OpCode = op.parse()?;
    let reg = |text: &str| -> Result<Reg, ParseErrorKind> {
        let reg: Reg = text.parse()?;
        if reg.class() == op.reg_class() {
            Ok(reg)
        } else {
            Err(ParseErrorKind::WrongRegisterClass {
                op,
                reg: text.to_string(),
            })
        }
    };

    Ok(Some(Instruction::new(
        id,
        op,
        reg(dest)?,
        reg(src1)?,
        reg(src2)?,
    )))
}
