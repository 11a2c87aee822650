//! Register status table.
//!
//! Maps each architectural register to the reservation station that will
//! produce its next value, or nothing if the register file already holds
//! it. One table exists per register file. This is the renaming mechanism:
//! issue overwrites an entry unconditionally so the newest producer always
//! wins, and write-result clears an entry only if it still names the
//! completing station.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::common::reg::Reg;

use super::station::StationId;

/// Register -> in-flight producer station.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegisterStatus {
    producers: BTreeMap<Reg, StationId>,
}

impl RegisterStatus {
    /// Creates a table with every register clear.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `station` as the latest producer of `reg`, replacing any
    /// earlier producer.
    pub fn set_producer(&mut self, reg: Reg, station: StationId) {
        let _ = self.producers.insert(reg, station);
    }

    /// Station that will produce `reg`, or `None` if the value is in the
    /// register file.
    pub fn producer(&self, reg: Reg) -> Option<StationId> {
        self.producers.get(&reg).copied()
    }

    /// Clears `reg`, but only if `station` is still its producer.
    ///
    /// Returns `true` if the entry was cleared. A `false` return means a
    /// newer instruction renamed the register (WAW) and the caller must not
    /// write the stale result.
    pub fn clear_if_match(&mut self, reg: Reg, station: StationId) -> bool {
        if self.producer(reg) == Some(station) {
            let _ = self.producers.remove(&reg);
            true
        } else {
            false
        }
    }

    /// Clears every entry.
    pub fn clear(&mut self) {
        self.producers.clear();
    }

    /// Whether no register has a pending producer.
    pub fn is_clear(&self) -> bool {
        self.producers.is_empty()
    }

    /// Pending `(register, producer)` pairs in register order.
    pub fn iter(&self) -> impl Iterator<Item = (Reg, StationId)> + '_ {
        self.producers.iter().map(|(&reg, &station)| (reg, station))
    }
}
