//! Execute phase.
//!
//! Walks the busy stations in pool order. A station already executing
//! counts down one cycle and stamps its execution end when the counter hits
//! zero. A station with both operands starts executing and counts its first
//! cycle immediately. Anything else is blocked on a RAW hazard and reports
//! the producers it waits for.

use crate::core::state::MachineState;
use crate::trace::EventKind;

use super::{StageOutput, timing_mut};

/// Runs the execute phase.
pub fn execute_stage(state: &mut MachineState, out: &mut StageOutput) {
    let cycle = out.cycle;
    for rs in state.stations.iter_mut() {
        let id = rs.id;
        let Some(entry) = rs.entry.as_mut() else {
            continue;
        };

        if entry.executing {
            if entry.remaining == 0 {
                continue;
            }
            entry.remaining -= 1;
            if entry.remaining == 0 {
                if let Some(timing) = timing_mut(&mut state.instructions, entry.instruction) {
                    timing.stamp_exec_end(cycle);
                }
            }
        } else if entry.is_ready() {
            let latency = entry.remaining;
            entry.executing = true;
            entry.remaining = latency.saturating_sub(1);
            if let Some(timing) = timing_mut(&mut state.instructions, entry.instruction) {
                timing.stamp_exec_start(cycle);
                if entry.remaining == 0 {
                    timing.stamp_exec_end(cycle);
                }
            }
            out.emit(
                EventKind::Execute,
                format!("{id} starts executing {} ({latency} cycles)", entry.op),
            );
            out.activity.executions_started += 1;
        } else {
            let waiting: Vec<String> = entry.pending_tags().map(|tag| tag.to_string()).collect();
            out.emit(
                EventKind::Hazard,
                format!("{id} waiting for: {}", waiting.join(", ")),
            );
            out.activity.raw_waits += 1;
        }
    }
}
