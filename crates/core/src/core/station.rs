//! Reservation stations.
//!
//! A reservation station is a functional-unit slot holding one in-flight
//! instruction. Each source operand is either a value captured at issue (or
//! from a broadcast) or the tag of the station that will produce it. The
//! operand type makes "value and tag at once" unrepresentable.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::reg::{Reg, Value};
use crate::isa::{FunctionalUnit, OpCode};

/// Stable name of a reservation station, e.g. `Add2` or `IntMult1`.
///
/// Station ids double as the tags carried by pending operands and by the
/// register status tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StationId {
    /// Functional unit the station belongs to.
    pub unit: FunctionalUnit,
    /// 1-based index within the unit's group.
    pub index: u8,
}

impl StationId {
    /// Creates a station id.
    pub const fn new(unit: FunctionalUnit, index: u8) -> Self {
        Self { unit, index }
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.unit.station_prefix(), self.index)
    }
}

/// Error returned when a string is not a station name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid station name `{0}`")]
pub struct InvalidStationName(pub String);

impl FromStr for StationId {
    type Err = InvalidStationName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FunctionalUnit::ALL
            .into_iter()
            .find_map(|unit| {
                let index = s.strip_prefix(unit.station_prefix())?.parse::<u8>().ok()?;
                (index > 0).then_some(Self::new(unit, index))
            })
            .ok_or_else(|| InvalidStationName(s.to_string()))
    }
}

impl From<StationId> for String {
    fn from(id: StationId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for StationId {
    type Error = InvalidStationName;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A source operand: the Vj/Qj (or Vk/Qk) pair of a station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Value available (Vj set, Qj clear).
    Ready(Value),
    /// Waiting on the named producer (Qj set, Vj clear).
    Pending(StationId),
}

impl Operand {
    /// The value, if available.
    pub const fn value(self) -> Option<Value> {
        match self {
            Self::Ready(v) => Some(v),
            Self::Pending(_) => None,
        }
    }

    /// The producer tag, if still waiting.
    pub const fn tag(self) -> Option<StationId> {
        match self {
            Self::Ready(_) => None,
            Self::Pending(tag) => Some(tag),
        }
    }

    /// Whether the value is available.
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Replaces a pending tag matching `producer` with `value`.
    ///
    /// Returns `true` if the operand captured the value.
    pub fn capture(&mut self, producer: StationId, value: Value) -> bool {
        if *self == Self::Pending(producer) {
            *self = Self::Ready(value);
            true
        } else {
            false
        }
    }
}

/// Contents of a busy station.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StationEntry {
    /// Operation to perform.
    pub op: OpCode,
    /// First source operand (Vj/Qj).
    pub j: Operand,
    /// Second source operand (Vk/Qk).
    pub k: Operand,
    /// Destination register.
    pub dest: Reg,
    /// Id of the owning instruction.
    pub instruction: u32,
    /// Execution cycles still to run.
    pub remaining: u32,
    /// Whether execution has started.
    pub executing: bool,
}

impl StationEntry {
    /// Both operands are available, so execution may begin.
    pub const fn is_ready(&self) -> bool {
        self.j.is_ready() && self.k.is_ready()
    }

    /// Producers this station is still waiting on, in operand order.
    pub fn pending_tags(&self) -> impl Iterator<Item = StationId> {
        [self.j.tag(), self.k.tag()].into_iter().flatten()
    }

    /// Execution finished; the result goes out in the next write-result phase.
    pub const fn is_finished(&self) -> bool {
        self.executing && self.remaining == 0
    }
}

/// One reservation station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReservationStation {
    /// Name, stable for the life of the pool.
    pub id: StationId,
    /// In-flight instruction; `None` when the station is free.
    pub entry: Option<StationEntry>,
}

impl ReservationStation {
    /// Creates a free station.
    pub const fn new(id: StationId) -> Self {
        Self { id, entry: None }
    }

    /// Whether the station holds an instruction.
    pub const fn is_busy(&self) -> bool {
        self.entry.is_some()
    }

    /// Resets the station to the empty state.
    pub fn clear(&mut self) {
        self.entry = None;
    }
}
