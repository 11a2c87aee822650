//! # Parser Tests
//!
//! Program text through the public entry points, including how rejected
//! lines surface from the simulator.

use pretty_assertions::assert_eq;
use rstest::rstest;
use tomasim_core::isa::parse_program;
use tomasim_core::{OpCode, ParseErrorKind, Reg, SimError, Simulator};

#[test]
fn test_full_program_round_trips_through_display() {
    let source = "MUL.D F0, F2, F4\nADD.D F6, F0, F8\nSUB R6, R4, R7\nDIV R1, R2, R3";
    let program = parse_program(source).unwrap();
    let printed: Vec<String> = program.iter().map(ToString::to_string).collect();
    assert_eq!(printed.join("\n"), source);
}

#[test]
fn test_mixed_case_and_comments() {
    let program = parse_program(
        "; header comment
         sub.d f8, F10, f14   ; trailing

         Div r1 r2 r3",
    )
    .unwrap();
    assert_eq!(program.len(), 2);
    assert_eq!(program[0].op, OpCode::SubD);
    assert_eq!(program[0].dest, Reg::fp(8));
    assert_eq!(program[1].op, OpCode::Div);
    assert_eq!(program[1].id, 2);
}

#[rstest]
#[case("LD F0, F2, F4", ParseErrorKind::UnknownOpcode("LD".into()))]
#[case("ADD.D F0, X2, F4", ParseErrorKind::InvalidRegister("X2".into()))]
#[case("ADD.D F0, F, F4", ParseErrorKind::InvalidRegister("F".into()))]
#[case("ADD R1, R99999, R2", ParseErrorKind::RegisterOutOfRange("R99999".into()))]
#[case("ADD.D F0", ParseErrorKind::Malformed { found: 2 })]
#[case(
    "SUB R1, R2, F3",
    ParseErrorKind::WrongRegisterClass { op: OpCode::Sub, reg: "F3".into() }
)]
fn test_rejected_lines(#[case] line: &str, #[case] expected: ParseErrorKind) {
    let err = parse_program(line).unwrap_err();
    assert_eq!(err.line, 1);
    assert_eq!(err.kind, expected);
}

#[test]
fn test_error_message_names_line() {
    let err = parse_program("ADD R1, R2, R3\nFOO R1, R2, R3").unwrap_err();
    assert_eq!(err.to_string(), "line 2: unknown operation `FOO`");
}

#[test]
fn test_simulator_keeps_old_program_on_parse_error() {
    let mut sim = Simulator::default();
    assert_eq!(sim.load_source("ADD R1, R2, R3").unwrap(), 1);

    let err = sim.load_source("ADD R1, R2\n").unwrap_err();
    assert!(matches!(err, SimError::Parse(ref e) if e.line == 1));
    assert_eq!(sim.instructions().len(), 1);
}

#[test]
fn test_empty_text_is_empty_program() {
    assert!(parse_program("\n  \n; nothing\n").unwrap().is_empty());
}
