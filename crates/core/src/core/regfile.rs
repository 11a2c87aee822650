//! Architectural register files.
//!
//! Each file maps register names to values. Registers that were never
//! written read as zero of the file's class, so programs may name any
//! `F<n>`/`R<n>` register, not only the ones with preset values.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::reg::{Reg, RegClass, Value};

/// Number of preset floating-point registers (`F0`, `F2`, ..., `F30`).
const FP_PRESET_COUNT: u16 = 16;

/// Number of preset integer registers (`R0`..`R15`).
const INT_PRESET_COUNT: u16 = 16;

/// One architectural register file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterFile {
    class: RegClass,
    values: BTreeMap<Reg, Value>,
}

impl RegisterFile {
    /// Creates an empty file where every register reads as zero.
    pub const fn new(class: RegClass) -> Self {
        Self {
            class,
            values: BTreeMap::new(),
        }
    }

    /// Creates a file with the preset values: `F<n> = n` for even `n` up to
    /// 30, or `R<n> = n` for `n` up to 15.
    pub fn with_defaults(class: RegClass) -> Self {
        let mut file = Self::new(class);
        match class {
            RegClass::Float => {
                for n in (0..FP_PRESET_COUNT).map(|i| i * 2) {
                    file.write(Reg::fp(n), Value::Float(f64::from(n)));
                }
            }
            RegClass::Int => {
                for n in 0..INT_PRESET_COUNT {
                    file.write(Reg::int(n), Value::Int(i64::from(n)));
                }
            }
        }
        file
    }

    /// Register class held by this file.
    pub const fn class(&self) -> RegClass {
        self.class
    }

    /// Current value of `reg`.
    pub fn read(&self, reg: Reg) -> Value {
        self.values
            .get(&reg)
            .copied()
            .unwrap_or_else(|| self.class.zero())
    }

    /// Writes `value`, converted to this file's representation.
    pub fn write(&mut self, reg: Reg, value: Value) {
        let _ = self.values.insert(reg, value.coerce(self.class));
    }

    /// Registers with an explicit value, in register order.
    pub fn iter(&self) -> impl Iterator<Item = (Reg, Value)> + '_ {
        self.values.iter().map(|(&reg, &value)| (reg, value))
    }
}
