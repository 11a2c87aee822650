//! Simulator: owns the program, the configuration and the current snapshot.
//!
//! The cycle engine is a pure function; this type is the stateful wrapper a
//! front end drives. It tracks whether a run has started or completed,
//! accumulates the event log and statistics, and refuses to change the
//! machine underneath a run in progress.

use tracing::{debug, info, warn};

use crate::common::error::SimError;
use crate::common::reg::{Reg, RegClass, Value};
use crate::common::Cycle;
use crate::config::HardwareConfig;
use crate::core::{MachineState, RegisterFile, StationPool, advance};
use crate::isa::{Instruction, parse_program};
use crate::stats::SimStats;
use crate::trace::{Event, EventKind, EventLog};

/// Cycle bound used by front ends that do not pick their own.
pub const DEFAULT_MAX_CYCLES: Cycle = 10_000;

/// Stateful Tomasulo simulator.
#[derive(Debug, Clone)]
pub struct Simulator {
    config: HardwareConfig,
    state: MachineState,
    cycle: Cycle,
    log: EventLog,
    stats: SimStats,
    started: bool,
    complete: bool,
}

impl Simulator {
    /// Creates a simulator with an empty program and preset register values.
    ///
    /// Rejects a configuration that fails [`HardwareConfig::validate`].
    pub fn new(config: HardwareConfig) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self::with_valid_config(config))
    }

    fn with_valid_config(config: HardwareConfig) -> Self {
        let state = MachineState::new(Vec::new(), &config);
        Self {
            config,
            state,
            cycle: 0,
            log: EventLog::new(),
            stats: SimStats::default(),
            started: false,
            complete: false,
        }
    }

    /// Active hardware configuration.
    pub const fn config(&self) -> &HardwareConfig {
        &self.config
    }

    /// Current snapshot.
    pub const fn state(&self) -> &MachineState {
        &self.state
    }

    /// Last simulated cycle (0 before the first step).
    pub const fn cycle(&self) -> Cycle {
        self.cycle
    }

    /// Every event since the program was loaded or the simulator reset.
    pub fn events(&self) -> &[Event] {
        self.log.as_slice()
    }

    /// The event log.
    pub const fn log(&self) -> &EventLog {
        &self.log
    }

    /// Statistics for the current run.
    pub const fn stats(&self) -> &SimStats {
        &self.stats
    }

    /// Loaded program with timing stamps.
    pub fn instructions(&self) -> &[Instruction] {
        &self.state.instructions
    }

    /// Register file for `class`.
    pub const fn registers(&self, class: RegClass) -> &RegisterFile {
        self.state.regs(class)
    }

    /// `start` has been called since the last load or reset.
    pub const fn is_started(&self) -> bool {
        self.started
    }

    /// Every instruction has written its result.
    pub const fn is_complete(&self) -> bool {
        self.complete
    }

    /// Started and not yet complete.
    pub const fn is_running(&self) -> bool {
        self.started && !self.complete
    }

    /// Replaces the program and returns the machine to cycle 0.
    ///
    /// Register values are kept; stations, status tables, the event log and
    /// statistics are cleared.
    pub fn load_program(&mut self, instructions: Vec<Instruction>) {
        info!(instructions = instructions.len(), "program loaded");
        let fp_regs = self.state.fp_regs.clone();
        let int_regs = self.state.int_regs.clone();
        self.state = MachineState::with_registers(instructions, &self.config, fp_regs, int_regs);
        self.rewind();
    }

    /// Parses `source` and loads it. Returns the number of instructions.
    pub fn load_source(&mut self, source: &str) -> Result<usize, SimError> {
        let program = parse_program(source)?;
        let count = program.len();
        self.load_program(program);
        Ok(count)
    }

    /// Begins a run. Calling it again on a started run does nothing.
    pub fn start(&mut self) -> Result<(), SimError> {
        if self.state.instructions.is_empty() {
            return Err(SimError::EmptyProgram);
        }
        if self.started {
            return Ok(());
        }
        self.started = true;
        self.log.record(0, EventKind::Info, "Simulation started");
        info!(instructions = self.state.instructions.len(), "simulation started");
        Ok(())
    }

    /// Advances one cycle.
    ///
    /// Returns the events of the new cycle, or `None` if the run has not
    /// started or is already complete.
    pub fn step(&mut self) -> Option<&[Event]> {
        if !self.is_running() {
            return None;
        }
        let cycle = self.cycle + 1;
        let step = advance(cycle, &self.state, &self.config);
        let first = self.log.len();

        self.log.extend_from_slice(&step.events);
        self.stats.record(&step.activity);
        self.state = step.state;
        self.cycle = cycle;

        if step.complete {
            self.complete = true;
            self.log.record(
                cycle,
                EventKind::Info,
                "Simulation complete - all instructions finished",
            );
            info!(cycles = cycle, ipc = self.stats.ipc(), "simulation complete");
        }
        self.log.as_slice().get(first..)
    }

    /// Steps until the program completes, starting the run if needed.
    ///
    /// Returns the cycle the last instruction wrote its result, or
    /// [`SimError::CycleLimit`] if `max_cycles` pass first.
    pub fn run(&mut self, max_cycles: Cycle) -> Result<Cycle, SimError> {
        self.start()?;
        while !self.complete {
            if self.cycle >= max_cycles {
                warn!(max_cycles, "cycle limit reached");
                return Err(SimError::CycleLimit(max_cycles));
            }
            let _ = self.step();
        }
        Ok(self.cycle)
    }

    /// Validates and stores a new configuration.
    ///
    /// New latencies apply to instructions issued afterwards; station counts
    /// take effect on the next [`Self::rebuild_stations`], load or reset.
    pub fn configure(&mut self, config: HardwareConfig) -> Result<(), SimError> {
        self.ensure_idle("reconfigure")?;
        config.validate()?;
        debug!(?config, "configuration updated");
        self.config = config;
        Ok(())
    }

    /// Rebuilds the reservation stations from the current configuration.
    pub fn rebuild_stations(&mut self) -> Result<(), SimError> {
        self.ensure_idle("rebuild stations")?;
        self.state.stations = StationPool::new(&self.config.stations);
        debug!(stations = self.state.stations.len(), "stations rebuilt");
        Ok(())
    }

    /// Returns to cycle 0 with preset register values, keeping the program.
    pub fn reset(&mut self) {
        let program = std::mem::take(&mut self.state.instructions);
        self.state = MachineState::new(program, &self.config);
        self.rewind();
        info!("simulator reset");
    }

    /// Sets a register's value before a run.
    pub fn set_register(&mut self, reg: Reg, value: Value) -> Result<(), SimError> {
        self.ensure_idle("set registers")?;
        self.state.regs_mut(reg.class()).write(reg, value);
        debug!(%reg, %value, "register set");
        Ok(())
    }

    fn ensure_idle(&self, action: &'static str) -> Result<(), SimError> {
        if self.is_running() {
            Err(SimError::RunInProgress(action))
        } else {
            Ok(())
        }
    }

    fn rewind(&mut self) {
        self.cycle = 0;
        self.log.clear();
        self.stats = SimStats::default();
        self.started = false;
        self.complete = false;
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::with_valid_config(HardwareConfig::default())
    }
}
