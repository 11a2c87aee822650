use tomasim_core::core::MachineState;
use tomasim_core::isa::Timing;
use tomasim_core::{
    Cycle, Event, EventKind, FunctionalUnit, HardwareConfig, OpCode, Reg, Simulator, Value,
};
use tracing_subscriber::EnvFilter;

/// Upper bound used by `run`; every test program finishes far sooner.
pub const MAX_CYCLES: Cycle = 5_000;

/// Routes simulator logs to the test writer. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Simulator plus the hardware configuration the test has built up.
pub struct TestContext {
    /// Simulator under test.
    pub sim: Simulator,
    config: HardwareConfig,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

impl TestContext {
    /// Default hardware, empty program, tracing installed.
    pub fn new() -> Self {
        init_tracing();
        let config = HardwareConfig::default();
        Self {
            sim: Simulator::new(config.clone()).unwrap(),
            config,
        }
    }

    /// One station per unit type; the classic single-issue-per-unit setup.
    pub fn single_stations(mut self) -> Self {
        for unit in FunctionalUnit::ALL {
            self.config.stations.set(unit, 1);
        }
        self.apply()
    }

    /// Sets the station count of `unit`.
    pub fn with_stations(mut self, unit: FunctionalUnit, count: usize) -> Self {
        self.config.stations.set(unit, count);
        self.apply()
    }

    /// Sets the latency of `op`.
    pub fn with_latency(mut self, op: OpCode, latency: u32) -> Self {
        self.config.latencies.set(op, latency);
        self.apply()
    }

    /// Replaces the whole hardware configuration.
    pub fn with_config(mut self, config: HardwareConfig) -> Self {
        self.config = config;
        self.apply()
    }

    /// Parses and loads `source`. Configure hardware before calling this.
    pub fn load(mut self, source: &str) -> Self {
        let _ = self.sim.load_source(source).unwrap();
        self
    }

    fn apply(mut self) -> Self {
        self.sim.configure(self.config.clone()).unwrap();
        self.sim.rebuild_stations().unwrap();
        self
    }

    /// Runs to completion and returns the final cycle.
    pub fn run(&mut self) -> Cycle {
        self.sim.run(MAX_CYCLES).unwrap()
    }

    /// Starts if needed and steps until `cycle` has been simulated.
    pub fn run_until(&mut self, cycle: Cycle) {
        self.sim.start().unwrap();
        while self.sim.cycle() < cycle {
            assert!(
                self.sim.step().is_some(),
                "finished at cycle {} before reaching {cycle}",
                self.sim.cycle()
            );
        }
    }

    /// Current machine snapshot.
    pub fn state(&self) -> &MachineState {
        self.sim.state()
    }

    /// Timing stamps of instruction `id` (1-based).
    pub fn timing(&self, id: u32) -> Timing {
        self.state().instruction(id).unwrap().timing
    }

    /// `(issued, exec_start, exec_end, write)`, all required to be set.
    pub fn stamps(&self, id: u32) -> (Cycle, Cycle, Cycle, Cycle) {
        let t = self.timing(id);
        (
            t.issued.unwrap(),
            t.exec_start.unwrap(),
            t.exec_end.unwrap(),
            t.write.unwrap(),
        )
    }

    /// Value of `F{index}`; panics if it holds an integer.
    pub fn fp(&self, index: u16) -> f64 {
        match self.state().fp_regs.read(Reg::fp(index)) {
            Value::Float(v) => v,
            Value::Int(v) => panic!("F{index} holds integer {v}"),
        }
    }

    /// Value of `R{index}`; panics if it holds a float.
    pub fn int(&self, index: u16) -> i64 {
        match self.state().int_regs.read(Reg::int(index)) {
            Value::Int(v) => v,
            Value::Float(v) => panic!("R{index} holds float {v}"),
        }
    }

    /// Every event logged in `cycle`, in order.
    pub fn events_at(&self, cycle: Cycle) -> Vec<&Event> {
        self.sim.log().for_cycle(cycle).collect()
    }

    /// Messages of `kind` logged in `cycle`, in order.
    pub fn messages(&self, cycle: Cycle, kind: EventKind) -> Vec<&str> {
        self.sim
            .log()
            .for_cycle(cycle)
            .filter(|e| e.kind == kind)
            .map(|e| e.message.as_str())
            .collect()
    }

    /// Cycles in which some event's message equals `message`.
    pub fn cycles_with(&self, message: &str) -> Vec<Cycle> {
        self.sim
            .events()
            .iter()
            .filter(|e| e.message == message)
            .map(|e| e.cycle)
            .collect()
    }
}
