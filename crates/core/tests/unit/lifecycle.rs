//! # Simulator Lifecycle Tests
//!
//! Loading, starting, stepping, resetting and reconfiguring the simulator,
//! and the guards that keep the machine fixed during a run.

use pretty_assertions::assert_eq;
use tomasim_core::sim::DEFAULT_MAX_CYCLES;
use rstest::rstest;
use tomasim_core::{
    ConfigError, EventKind, FunctionalUnit, HardwareConfig, Reg, RegClass, SimError, Simulator,
    Value,
};

use crate::common::harness::TestContext;

#[test]
fn test_fresh_simulator() {
    let sim = Simulator::default();
    assert_eq!(sim.cycle(), 0);
    assert!(sim.instructions().is_empty());
    assert!(sim.events().is_empty());
    assert!(!sim.is_started());
    assert!(!sim.is_complete());
    assert_eq!(sim.state().stations.len(), 9);
    assert_eq!(sim.registers(RegClass::Float).read(Reg::fp(30)), Value::Float(30.0));
    assert_eq!(sim.registers(RegClass::Int).read(Reg::int(15)), Value::Int(15));
}

#[test]
fn test_load_keeps_registers_and_clears_run() {
    let mut sim = Simulator::default();
    sim.set_register(Reg::fp(2), Value::Float(3.5)).unwrap();
    let _ = sim.load_source("ADD.D F0, F2, F2").unwrap();
    let _ = sim.run(DEFAULT_MAX_CYCLES).unwrap();
    assert_eq!(sim.state().fp_regs.read(Reg::fp(0)), Value::Float(7.0));

    let _ = sim.load_source("SUB.D F4, F0, F2").unwrap();
    assert_eq!(sim.cycle(), 0);
    assert!(sim.events().is_empty());
    assert!(!sim.is_started());
    assert!(!sim.is_complete());
    assert_eq!(sim.stats().cycles, 0);
    // Values written by the previous program stay in the register file.
    assert_eq!(sim.state().fp_regs.read(Reg::fp(0)), Value::Float(7.0));

    let _ = sim.run(DEFAULT_MAX_CYCLES).unwrap();
    assert_eq!(sim.state().fp_regs.read(Reg::fp(4)), Value::Float(3.5));
}

#[test]
fn test_reset_restores_presets_and_keeps_program() {
    let mut ctx = TestContext::new().load("MUL.D F2, F2, F4\nADD R1, R1, R1");
    let _ = ctx.run();
    assert_eq!(ctx.fp(2), 8.0);

    ctx.sim.reset();
    assert_eq!(ctx.sim.cycle(), 0);
    assert!(ctx.sim.events().is_empty());
    assert!(!ctx.sim.is_started());
    assert_eq!(ctx.fp(2), 2.0);
    assert_eq!(ctx.int(1), 1);
    assert_eq!(ctx.sim.instructions().len(), 2);
    assert!(ctx.sim.instructions().iter().all(|i| i.timing == Default::default()));
    assert!(ctx.state().fp_status.is_clear());
    assert!(ctx.state().stations.is_idle());

    let _ = ctx.run();
    assert_eq!(ctx.fp(2), 8.0);
}

#[test]
fn test_replay_after_reset_is_identical() {
    let mut ctx = TestContext::new().load(tomasim_core::sim::demo("basic").unwrap().source);
    let _ = ctx.run();
    let first_events = ctx.sim.events().to_vec();
    let first_program = ctx.sim.instructions().to_vec();

    ctx.sim.reset();
    let _ = ctx.run();
    assert_eq!(ctx.sim.events(), first_events.as_slice());
    assert_eq!(ctx.sim.instructions(), first_program.as_slice());
}

#[test]
fn test_start_and_completion_notices() {
    let mut ctx = TestContext::new().load("ADD R1, R2, R3");
    let last = ctx.run();

    let events = ctx.sim.events();
    assert_eq!(events.first().unwrap().kind, EventKind::Info);
    assert_eq!(events.first().unwrap().message, "Simulation started");
    assert_eq!(events.last().unwrap().cycle, last);
    assert_eq!(
        events.last().unwrap().message,
        "Simulation complete - all instructions finished"
    );
    assert_eq!(
        events.iter().filter(|e| e.kind == EventKind::Info).count(),
        2
    );
}

#[test]
fn test_events_ordered_by_cycle() {
    let mut ctx = TestContext::new().load(tomasim_core::sim::demo("basic").unwrap().source);
    let _ = ctx.run();
    let cycles: Vec<_> = ctx.sim.events().iter().map(|e| e.cycle).collect();
    assert!(cycles.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_phase_order_within_cycle() {
    let mut ctx = TestContext::new()
        .single_stations()
        .load("MUL.D F0, F2, F4\nADD.D F6, F0, F8\nADD R1, R2, R3");
    let _ = ctx.run();

    // Cycle 12: Mult1 writes, Add1 starts, nothing left to issue.
    let kinds: Vec<_> = ctx.events_at(12).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Write, EventKind::Execute]);
    // Cycle 3: Add1 reports its wait before the integer add issues.
    let kinds: Vec<_> = ctx.events_at(3).iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![EventKind::Hazard, EventKind::Issue]);
}

#[test]
fn test_same_phase_events_follow_station_order() {
    let mut ctx = TestContext::new().load("ADD.D F0, F2, F4\nADD R1, R2, R3");
    let _ = ctx.run();

    // Both write in cycle 4; FP-add stations come before integer-add ones.
    assert_eq!(
        ctx.messages(4, EventKind::Write),
        vec!["Add1 writes result 6.00 to F0", "IntAdd1 writes result 5 to R1"]
    );
}

#[test]
fn test_wait_names_every_producer() {
    let mut ctx = TestContext::new().load("MUL.D F0, F2, F4\nMUL.D F2, F6, F8\nADD.D F4, F0, F2");
    ctx.run_until(4);

    assert_eq!(
        ctx.messages(3, EventKind::Hazard),
        vec!["RAW hazard: waiting for F0 from Mult1, F2 from Mult2"]
    );
    assert_eq!(
        ctx.messages(4, EventKind::Hazard),
        vec!["Add1 waiting for: Mult1, Mult2"]
    );
}

#[rstest]
#[case::oversize(300)]
#[case::zero(0)]
fn test_new_rejects_station_count(#[case] count: usize) {
    let mut config = HardwareConfig::default();
    config.stations.set(FunctionalUnit::IntAdd, count);

    let err = Simulator::new(config).unwrap_err();
    assert!(matches!(
        err,
        SimError::Config(ConfigError::StationCount { unit: FunctionalUnit::IntAdd, count: c }) if c == count
    ));
}

#[test]
fn test_new_accepts_range_limits() {
    let mut config = HardwareConfig::default();
    config.stations.set(FunctionalUnit::FpAdd, 10);
    config.stations.set(FunctionalUnit::IntMult, 1);

    let sim = Simulator::new(config).unwrap();
    assert_eq!(sim.state().stations.len(), 10 + 2 + 2 + 1);
}

#[test]
fn test_guards_lift_after_completion() {
    let mut ctx = TestContext::new().load("ADD R1, R2, R3");
    let _ = ctx.run();

    let mut config = HardwareConfig::default();
    config.stations.set(FunctionalUnit::IntAdd, 4);
    ctx.sim.configure(config).unwrap();
    ctx.sim.rebuild_stations().unwrap();
    ctx.sim.set_register(Reg::int(2), Value::Int(40)).unwrap();
    assert_eq!(ctx.state().stations.len(), 11);
}

#[test]
fn test_configure_rejects_invalid() {
    let mut sim = Simulator::default();
    let mut config = HardwareConfig::default();
    config.stations.set(FunctionalUnit::FpAdd, 11);
    assert!(matches!(sim.configure(config), Err(SimError::Config(_))));
    assert_eq!(sim.config(), &HardwareConfig::default());
}

#[test]
fn test_new_latency_applies_on_next_issue() {
    let mut sim = Simulator::default();
    let mut config = HardwareConfig::default();
    config.latencies.int_add = 5;
    sim.configure(config).unwrap();
    let _ = sim.load_source("ADD R1, R2, R3").unwrap();
    assert_eq!(sim.run(DEFAULT_MAX_CYCLES).unwrap(), 7);
}

#[test]
fn test_station_count_applies_on_load() {
    let mut sim = Simulator::default();
    let mut config = HardwareConfig::default();
    config.stations.set(FunctionalUnit::FpMult, 4);
    sim.configure(config).unwrap();
    let _ = sim.load_source("MUL.D F0, F2, F4").unwrap();
    let names: Vec<String> = sim
        .state()
        .stations
        .iter()
        .filter(|rs| rs.id.unit == FunctionalUnit::FpMult)
        .map(|rs| rs.id.to_string())
        .collect();
    assert_eq!(names, ["Mult1", "Mult2", "Mult3", "Mult4"]);
}

#[test]
fn test_run_with_empty_program() {
    let mut sim = Simulator::default();
    assert!(matches!(sim.run(10), Err(SimError::EmptyProgram)));
}
