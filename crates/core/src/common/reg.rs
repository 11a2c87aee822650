//! Register names and register values.
//!
//! The machine has two architectural register files. It provides:
//! 1. **Register classes:** `F<n>` floating-point registers and `R<n>` integer registers.
//! 2. **Register names:** A validated, ordered register identifier used as a map key.
//! 3. **Values:** A tagged register value, so FP and integer arithmetic stay distinct.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::ParseErrorKind;

/// Architectural register file a register belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegClass {
    /// Floating-point file (`F0`, `F2`, ...), holds `f64` values.
    Float,
    /// Integer file (`R0`, `R1`, ...), holds `i64` values.
    Int,
}

impl RegClass {
    /// Both register classes, floating-point first.
    pub const ALL: [Self; 2] = [Self::Float, Self::Int];

    /// Name prefix used in assembly text.
    pub const fn prefix(self) -> char {
        match self {
            Self::Float => 'F',
            Self::Int => 'R',
        }
    }

    /// Zero value of this class; unwritten registers read as this.
    pub const fn zero(self) -> Value {
        match self {
            Self::Float => Value::Float(0.0),
            Self::Int => Value::Int(0),
        }
    }
}

/// An architectural register name such as `F6` or `R3`.
///
/// Serialized as its textual name so that register maps render as
/// `{"F0": 0.0, "F2": 2.0}` in JSON.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Reg {
    class: RegClass,
    index: u16,
}

impl Reg {
    /// Creates a register of the given class and index.
    pub const fn new(class: RegClass, index: u16) -> Self {
        Self { class, index }
    }

    /// Floating-point register `F<index>`.
    pub const fn fp(index: u16) -> Self {
        Self::new(RegClass::Float, index)
    }

    /// Integer register `R<index>`.
    pub const fn int(index: u16) -> Self {
        Self::new(RegClass::Int, index)
    }

    /// Register file this register lives in.
    pub const fn class(self) -> RegClass {
        self.class
    }

    /// Numeric index within the register file.
    pub const fn index(self) -> u16 {
        self.index
    }
}

impl fmt::Display for Reg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.class.prefix(), self.index)
    }
}

impl FromStr for Reg {
    type Err = ParseErrorKind;

    /// Parses `F<n>` or `R<n>`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let class = match chars.next().map(|c| c.to_ascii_uppercase()) {
            Some('F') => RegClass::Float,
            Some('R') => RegClass::Int,
            _ => return Err(ParseErrorKind::InvalidRegister(s.to_string())),
        };
        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ParseErrorKind::InvalidRegister(s.to_string()));
        }
        let index = digits
            .parse::<u16>()
            .map_err(|_| ParseErrorKind::RegisterOutOfRange(s.to_string()))?;
        Ok(Self::new(class, index))
    }
}

impl From<Reg> for String {
    fn from(reg: Reg) -> Self {
        reg.to_string()
    }
}

impl TryFrom<String> for Reg {
    type Error = ParseErrorKind;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Contents of a register or a reservation-station operand.
///
/// Untagged in JSON: integers deserialize as `Int`, anything with a fraction
/// or exponent as `Float`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Integer-file value.
    Int(i64),
    /// Floating-point-file value.
    Float(f64),
}

impl Value {
    /// Register class matching this value's representation.
    pub const fn class(self) -> RegClass {
        match self {
            Self::Int(_) => RegClass::Int,
            Self::Float(_) => RegClass::Float,
        }
    }

    /// Value as a double; integers convert exactly up to 2^53.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// Value as an integer; floats truncate toward zero and saturate.
    pub fn as_i64(self) -> i64 {
        match self {
            Self::Int(v) => v,
            Self::Float(v) => v as i64,
        }
    }

    /// Converts the value into the representation used by `class`.
    pub fn coerce(self, class: RegClass) -> Self {
        match class {
            RegClass::Float => Self::Float(self.as_f64()),
            RegClass::Int => Self::Int(self.as_i64()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v:.2}"),
        }
    }
}
