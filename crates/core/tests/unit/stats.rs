//! # Statistics Tests
//!
//! Verifies that [`SimStats`](tomasim_core::stats::SimStats) agrees with the
//! timing stamps and event log of complete runs.

use pretty_assertions::assert_eq;
use tomasim_core::sim::demo;
use tomasim_core::{EventKind, FunctionalUnit};

use crate::common::harness::TestContext;

#[test]
fn test_raw_run_counters() {
    let mut ctx = TestContext::new()
        .single_stations()
        .load("MUL.D F0, F2, F4\nADD.D F6, F0, F8");
    let _ = ctx.run();
    let stats = ctx.sim.stats();

    assert_eq!(stats.cycles, 14);
    assert_eq!(stats.issued, 2);
    assert_eq!(stats.retired, 2);
    assert_eq!(stats.structural_stalls, 0);
    assert_eq!(stats.raw_wait_cycles, 9);
    assert_eq!(stats.forwarded_operands, 1);
    assert_eq!(stats.suppressed_writes, 0);
    assert!((stats.ipc() - 2.0 / 14.0).abs() < 1e-12);
}

#[test]
fn test_structural_stalls_counted() {
    let mut ctx = TestContext::new()
        .with_stations(FunctionalUnit::FpMult, 1)
        .load("MUL.D F0, F2, F4\nMUL.D F6, F8, F10");
    let _ = ctx.run();
    assert_eq!(ctx.sim.stats().structural_stalls, 10);
}

#[test]
fn test_counters_match_event_log() {
    for name in ["basic", "raw_hazard", "waw_hazard", "integer_ops", "mixed"] {
        let mut ctx = TestContext::new().load(demo(name).unwrap().source);
        let cycles = ctx.run();
        let stats = ctx.sim.stats().clone();
        let count = |kind| ctx.sim.events().iter().filter(|e| e.kind == kind).count() as u64;

        assert_eq!(stats.cycles, cycles, "{name}");
        assert_eq!(stats.issued, count(EventKind::Issue), "{name}");
        assert_eq!(stats.retired, count(EventKind::Write), "{name}");
        assert_eq!(stats.retired, ctx.sim.instructions().len() as u64, "{name}");
    }
}

#[test]
fn test_report_mentions_totals() {
    let mut ctx = TestContext::new().load("ADD R1, R2, R3");
    let _ = ctx.run();
    let report = ctx.sim.stats().to_string();
    assert!(report.contains("sim_cycles               3"));
    assert!(report.contains("sim_insts.retired        1"));
}
