//! Reservation station pool.
//!
//! Stations are created grouped by unit type (FP add, FP multiply, integer
//! add, integer multiply) and numbered from 1 within each group. That
//! creation order is the allocation and iteration order used everywhere,
//! which keeps the event log deterministic. The pool does no cross-station
//! reasoning beyond the result broadcast; hazard logic lives in the stages.

use serde::{Deserialize, Serialize};

use crate::common::reg::Value;
use crate::config::{STATION_RANGE, StationCounts};
use crate::isa::{FunctionalUnit, OpCode};

use super::station::{ReservationStation, StationEntry, StationId};

/// Fixed set of reservation stations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StationPool {
    stations: Vec<ReservationStation>,
}

impl StationPool {
    /// Builds an empty pool with `counts` stations per unit.
    ///
    /// Each count is clamped to [`STATION_RANGE`], so every unit has at least
    /// one station and every station name is unique.
    pub fn new(counts: &StationCounts) -> Self {
        let stations = FunctionalUnit::ALL
            .into_iter()
            .flat_map(|unit| {
                let count = counts
                    .get(unit)
                    .clamp(*STATION_RANGE.start(), *STATION_RANGE.end());
                (1..=count as u8).map(move |index| ReservationStation::new(StationId::new(unit, index)))
            })
            .collect();
        Self { stations }
    }

    /// Number of stations.
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    /// Whether the pool has no stations at all.
    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Stations in creation order.
    pub fn iter(&self) -> std::slice::Iter<'_, ReservationStation> {
        self.stations.iter()
    }

    /// Mutable stations in creation order.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ReservationStation> {
        self.stations.iter_mut()
    }

    /// Station by position.
    pub fn get(&self, idx: usize) -> Option<&ReservationStation> {
        self.stations.get(idx)
    }

    /// Station by name.
    pub fn find(&self, id: StationId) -> Option<&ReservationStation> {
        self.stations.iter().find(|rs| rs.id == id)
    }

    /// Position of the first free station that can execute `op`.
    pub fn find_free(&self, op: OpCode) -> Option<usize> {
        let unit = op.unit();
        self.stations
            .iter()
            .position(|rs| rs.id.unit == unit && !rs.is_busy())
    }

    /// Places `entry` in the first free station of its unit type.
    ///
    /// Returns the station's name, or `None` on a structural hazard (every
    /// matching station busy).
    pub fn allocate(&mut self, entry: StationEntry) -> Option<StationId> {
        let idx = self.find_free(entry.op)?;
        let station = &mut self.stations[idx];
        station.entry = Some(entry);
        Some(station.id)
    }

    /// Resets the station at `idx` to the empty state.
    pub fn release(&mut self, idx: usize) {
        if let Some(station) = self.stations.get_mut(idx) {
            station.clear();
        }
    }

    /// Delivers `value` from `producer` to every other busy station waiting on it.
    ///
    /// Returns the number of operands that captured the value.
    pub fn broadcast(&mut self, producer: StationId, value: Value) -> u32 {
        let mut captured = 0;
        for rs in &mut self.stations {
            if rs.id == producer {
                continue;
            }
            if let Some(entry) = rs.entry.as_mut() {
                captured += u32::from(entry.j.capture(producer, value));
                captured += u32::from(entry.k.capture(producer, value));
            }
        }
        captured
    }

    /// Number of busy stations.
    pub fn busy_count(&self) -> usize {
        self.stations.iter().filter(|rs| rs.is_busy()).count()
    }

    /// Whether every station is free.
    pub fn is_idle(&self) -> bool {
        self.stations.iter().all(|rs| !rs.is_busy())
    }
}

impl<'a> IntoIterator for &'a StationPool {
    type Item = &'a ReservationStation;
    type IntoIter = std::slice::Iter<'a, ReservationStation>;

    fn into_iter(self) -> Self::IntoIter {
        self.stations.iter()
    }
}
