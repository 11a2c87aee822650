//! Issue phase.
//!
//! Issues at most one instruction per cycle, strictly in program order. The
//! source operands are read through the register status table: a register
//! with a pending producer becomes that producer's tag, anything else is
//! copied from the register file. The destination is then renamed to the
//! new station, replacing any older producer.

use crate::config::HardwareConfig;
use crate::core::state::MachineState;
use crate::core::station::{Operand, StationEntry};
use crate::trace::EventKind;

use super::{StageOutput, timing_mut};

/// Runs the issue phase.
pub fn issue_stage(state: &mut MachineState, config: &HardwareConfig, out: &mut StageOutput) {
    let Some(inst) = state.instructions.get(state.issue_ptr) else {
        return;
    };
    let (id, op, dest, src1, src2) = (inst.id, inst.op, inst.dest, inst.src1, inst.src2);

    let class = op.reg_class();
    let regs = state.regs(class);
    let status = state.status(class);
    let read = |reg| {
        status
            .producer(reg)
            .map_or_else(|| Operand::Ready(regs.read(reg)), Operand::Pending)
    };
    let entry = StationEntry {
        op,
        j: read(src1),
        k: read(src2),
        dest,
        instruction: id,
        remaining: config.latencies.get(op),
        executing: false,
    };

    let Some(station) = state.stations.allocate(entry) else {
        out.emit(
            EventKind::Hazard,
            format!(
                "Structural hazard: No {} station available for {op}",
                op.unit()
            ),
        );
        out.activity.structural_stall = true;
        return;
    };

    let (_, status) = state.files_mut(class);
    status.set_producer(dest, station);
    if let Some(timing) = timing_mut(&mut state.instructions, id) {
        timing.stamp_issue(out.cycle);
    }
    state.issue_ptr += 1;

    out.emit(
        EventKind::Issue,
        format!("Issued {op} {dest}, {src1}, {src2} to {station}"),
    );
    out.activity.issued = true;

    let waiting: Vec<String> = [(src1, entry.j), (src2, entry.k)]
        .into_iter()
        .filter_map(|(reg, operand)| operand.tag().map(|tag| format!("{reg} from {tag}")))
        .collect();
    if !waiting.is_empty() {
        out.emit(
            EventKind::Hazard,
            format!("RAW hazard: waiting for {}", waiting.join(", ")),
        );
    }
}
