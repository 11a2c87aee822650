//! Write-result phase.
//!
//! Every station that finished executing broadcasts its result, in pool
//! order. The register file is only updated when the destination's status
//! entry still names the broadcasting station: if a younger instruction
//! renamed the register in the meantime, the older result is dropped from
//! the register file but still delivered to every station holding its tag.

use crate::core::state::MachineState;
use crate::trace::EventKind;

use super::{StageOutput, timing_mut};

/// Runs the write-result phase.
pub fn writeback_stage(state: &mut MachineState, out: &mut StageOutput) {
    for idx in 0..state.stations.len() {
        let Some(rs) = state.stations.get(idx) else {
            continue;
        };
        let id = rs.id;
        let Some(entry) = rs.entry.filter(|e| e.is_finished()) else {
            continue;
        };
        let (Some(a), Some(b)) = (entry.j.value(), entry.k.value()) else {
            continue;
        };
        let result = entry.op.compute(a, b);

        let (regs, status) = state.files_mut(entry.dest.class());
        let owned = status.clear_if_match(entry.dest, id);
        if owned {
            regs.write(entry.dest, result);
            out.emit(
                EventKind::Write,
                format!("{id} writes result {result} to {}", entry.dest),
            );
        } else {
            let newer = status
                .producer(entry.dest)
                .map_or_else(|| "a newer instruction".to_string(), |tag| tag.to_string());
            out.emit(
                EventKind::Write,
                format!(
                    "{id} result {result} not written to {} (superseded by {newer})",
                    entry.dest
                ),
            );
            out.activity.suppressed_writes += 1;
        }

        out.activity.forwarded_operands += state.stations.broadcast(id, result);
        out.activity.broadcasts += 1;

        if let Some(timing) = timing_mut(&mut state.instructions, entry.instruction) {
            timing.stamp_write(out.cycle);
        }
        state.stations.release(idx);
    }
}
