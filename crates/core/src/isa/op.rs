//! Operation codes and functional units.
//!
//! The instruction set is a closed set of eight arithmetic operations, split
//! across four functional-unit classes. This module provides:
//! 1. **Op codes:** The eight mnemonics with their register class.
//! 2. **Dispatch:** The fixed op -> functional-unit mapping.
//! 3. **Evaluation:** Result computation, with division by zero yielding zero.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::error::ParseErrorKind;
use crate::common::reg::{RegClass, Value};

/// Functional-unit type a reservation station is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FunctionalUnit {
    /// Floating-point adder (`ADD.D`, `SUB.D`).
    FpAdd,
    /// Floating-point multiplier (`MUL.D`, `DIV.D`).
    FpMult,
    /// Integer adder (`ADD`, `SUB`).
    IntAdd,
    /// Integer multiplier (`MUL`, `DIV`).
    IntMult,
}

impl FunctionalUnit {
    /// All unit types in station-creation order.
    pub const ALL: [Self; 4] = [Self::FpAdd, Self::FpMult, Self::IntAdd, Self::IntMult];

    /// Prefix of the station names for this unit (`Add1`, `Mult2`, ...).
    pub const fn station_prefix(self) -> &'static str {
        match self {
            Self::FpAdd => "Add",
            Self::FpMult => "Mult",
            Self::IntAdd => "IntAdd",
            Self::IntMult => "IntMult",
        }
    }

    /// Display name of the unit type.
    pub const fn name(self) -> &'static str {
        match self {
            Self::FpAdd => "FP_ADD",
            Self::FpMult => "FP_MULT",
            Self::IntAdd => "INT_ADD",
            Self::IntMult => "INT_MULT",
        }
    }
}

impl fmt::Display for FunctionalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One of the eight supported operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum OpCode {
    /// Double-precision add.
    #[serde(rename = "ADD.D")]
    AddD,
    /// Double-precision subtract.
    #[serde(rename = "SUB.D")]
    SubD,
    /// Double-precision multiply.
    #[serde(rename = "MUL.D")]
    MulD,
    /// Double-precision divide.
    #[serde(rename = "DIV.D")]
    DivD,
    /// Integer add.
    #[serde(rename = "ADD")]
    Add,
    /// Integer subtract.
    #[serde(rename = "SUB")]
    Sub,
    /// Integer multiply.
    #[serde(rename = "MUL")]
    Mul,
    /// Integer divide.
    #[serde(rename = "DIV")]
    Div,
}

impl OpCode {
    /// Every operation, floating-point first.
    pub const ALL: [Self; 8] = [
        Self::AddD,
        Self::SubD,
        Self::MulD,
        Self::DivD,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
    ];

    /// Assembly mnemonic.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::AddD => "ADD.D",
            Self::SubD => "SUB.D",
            Self::MulD => "MUL.D",
            Self::DivD => "DIV.D",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
        }
    }

    /// Functional unit that executes this operation.
    pub const fn unit(self) -> FunctionalUnit {
        match self {
            Self::AddD | Self::SubD => FunctionalUnit::FpAdd,
            Self::MulD | Self::DivD => FunctionalUnit::FpMult,
            Self::Add | Self::Sub => FunctionalUnit::IntAdd,
            Self::Mul | Self::Div => FunctionalUnit::IntMult,
        }
    }

    /// Register file all three operands must come from.
    pub const fn reg_class(self) -> RegClass {
        match self {
            Self::AddD | Self::SubD | Self::MulD | Self::DivD => RegClass::Float,
            Self::Add | Self::Sub | Self::Mul | Self::Div => RegClass::Int,
        }
    }

    /// Whether this is a double-precision operation.
    pub const fn is_fp(self) -> bool {
        matches!(self.reg_class(), RegClass::Float)
    }

    /// Computes `a <op> b`.
    ///
    /// Division by zero yields zero in both classes. Integer arithmetic
    /// wraps and integer division truncates toward zero.
    #[allow(clippy::float_cmp)]
    pub fn compute(self, a: Value, b: Value) -> Value {
        match self {
            Self::AddD => Value::Float(a.as_f64() + b.as_f64()),
            Self::SubD => Value::Float(a.as_f64() - b.as_f64()),
            Self::MulD => Value::Float(a.as_f64() * b.as_f64()),
            Self::DivD => {
                let divisor = b.as_f64();
                Value::Float(if divisor == 0.0 {
                    0.0
                } else {
                    a.as_f64() / divisor
                })
            }
            Self::Add => Value::Int(a.as_i64().wrapping_add(b.as_i64())),
            Self::Sub => Value::Int(a.as_i64().wrapping_sub(b.as_i64())),
            Self::Mul => Value::Int(a.as_i64().wrapping_mul(b.as_i64())),
            Self::Div => {
                let divisor = b.as_i64();
                Value::Int(if divisor == 0 {
                    0
                } else {
                    a.as_i64().wrapping_div(divisor)
                })
            }
        }
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

impl FromStr for OpCode {
    type Err = ParseErrorKind;

    /// Parses a mnemonic, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.mnemonic().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseErrorKind::UnknownOpcode(s.to_string()))
    }
}
