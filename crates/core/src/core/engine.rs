//! Cycle engine.
//!
//! `advance` is a pure function from one snapshot to the next. It clones the
//! incoming state, runs write result, execute and issue on the copy, and
//! hands back the new state together with the cycle's events. No state is
//! kept between calls.

use serde::Serialize;
use tracing::trace;

use crate::common::Cycle;
use crate::config::HardwareConfig;
use crate::stats::CycleActivity;
use crate::trace::Event;

use super::stages::{StageOutput, execute_stage, issue_stage, writeback_stage};
use super::state::MachineState;

/// Result of advancing the machine by one cycle.
#[derive(Debug, Clone, Serialize)]
pub struct Step {
    /// State at the end of the cycle.
    pub state: MachineState,
    /// Events emitted during the cycle, in phase order.
    pub events: Vec<Event>,
    /// Counters for statistics.
    pub activity: CycleActivity,
    /// Every instruction has written its result.
    pub complete: bool,
}

/// Simulates cycle `cycle` starting from `state`.
pub fn advance(cycle: Cycle, state: &MachineState, config: &HardwareConfig) -> Step {
    let mut next = state.clone();
    let mut out = StageOutput::new(cycle);

    writeback_stage(&mut next, &mut out);
    execute_stage(&mut next, &mut out);
    issue_stage(&mut next, config, &mut out);

    let complete = next.is_complete();
    trace!(
        cycle,
        events = out.log.len(),
        busy = next.stations.busy_count(),
        issue_ptr = next.issue_ptr,
        complete,
        "cycle advanced"
    );

    Step {
        state: next,
        events: out.log.into_vec(),
        activity: out.activity,
        complete,
    }
}
