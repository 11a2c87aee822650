//! Tomasulo scheduling simulator CLI.
//!
//! This binary drives the simulator from the command line. It performs:
//! 1. **Run:** Simulate a program file or a built-in demo, then print the timing
//!    table, register files and statistics (optionally the full event log), or
//!    the same data as JSON.
//! 2. **Demos:** List the built-in programs.
//! 3. **Config:** Print the default hardware configuration as JSON, ready to edit
//!    and pass back with `--config`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use tomasim_core::core::RegisterFile;
use tomasim_core::sim::{DEFAULT_MAX_CYCLES, DEMOS, demo};
use tomasim_core::stats::SimStats;
use tomasim_core::{Cycle, Event, HardwareConfig, Instruction, RegClass, Simulator};

#[derive(Parser, Debug)]
#[command(
    name = "tomasim",
    author,
    version,
    about = "Cycle-accurate Tomasulo scheduling simulator",
    long_about = "Simulate Tomasulo's algorithm on a short program of floating-point and integer \
                  arithmetic, cycle by cycle.\n\nExamples:\n  tomasim run program.s\n  \
                  tomasim run --demo waw_hazard --trace\n  \
                  tomasim config > machine.json && tomasim run program.s --config machine.json"
)]
struct Cli {
    /// Log verbosity (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and report timing, registers and statistics.
    Run {
        /// Program file, one `OP DEST, SRC1, SRC2` per line.
        #[arg(required_unless_present = "demo")]
        file: Option<PathBuf>,

        /// Run a built-in demo instead of a file (see `tomasim demos`).
        #[arg(long, conflicts_with = "file")]
        demo: Option<String>,

        /// Hardware configuration JSON; missing fields use defaults.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Give up after this many cycles.
        #[arg(long, default_value_t = DEFAULT_MAX_CYCLES)]
        max_cycles: Cycle,

        /// Emit a JSON report instead of text.
        #[arg(long)]
        json: bool,

        /// Include the cycle-by-cycle event log.
        #[arg(long)]
        trace: bool,
    },

    /// List the built-in demo programs.
    Demos,

    /// Print the default hardware configuration as JSON.
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            file,
            demo,
            config,
            max_cycles,
            json,
            trace,
        } => cmd_run(file, demo, config, max_cycles, json, trace),
        Commands::Demos => {
            cmd_demos();
            Ok(())
        }
        Commands::Config => cmd_config(),
    }
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the program and configuration, runs to completion, prints the report.
///
/// The report is printed even when the cycle limit is hit, so a stuck
/// program can still be inspected; the limit error is returned afterwards.
fn cmd_run(
    file: Option<PathBuf>,
    demo_name: Option<String>,
    config_path: Option<PathBuf>,
    max_cycles: Cycle,
    json: bool,
    trace: bool,
) -> Result<()> {
    let source = match (file, demo_name) {
        (_, Some(name)) => demo(&name)
            .with_context(|| format!("unknown demo `{name}` (try `tomasim demos`)"))?
            .source
            .to_string(),
        (Some(path), None) => fs::read_to_string(&path)
            .with_context(|| format!("failed to read program {}", path.display()))?,
        (None, None) => anyhow::bail!("specify a program file or --demo <name>"),
    };

    let config = match config_path {
        Some(path) => {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("failed to read config {}", path.display()))?;
            HardwareConfig::from_json(&text)
                .with_context(|| format!("invalid config {}", path.display()))?
        }
        None => HardwareConfig::default(),
    };
    debug!(?config, "hardware configuration");

    let mut sim = Simulator::new(config).context("invalid hardware configuration")?;
    let count = sim.load_source(&source).context("failed to parse program")?;
    debug!(instructions = count, "program parsed");

    let outcome = sim.run(max_cycles);

    if json {
        print_json(&sim, trace)?;
    } else {
        print_report(&sim, trace);
    }

    let cycles = outcome.context("simulation did not finish")?;
    debug!(cycles, "run finished");
    Ok(())
}

fn cmd_demos() {
    for d in DEMOS {
        println!("{:<12} {}", d.name, d.description);
    }
}

fn cmd_config() -> Result<()> {
    let json = serde_json::to_string_pretty(&HardwareConfig::default())
        .context("failed to encode default configuration")?;
    println!("{json}");
    Ok(())
}

/// Machine-readable run summary.
#[derive(Serialize)]
struct Report<'a> {
    cycles: Cycle,
    complete: bool,
    config: &'a HardwareConfig,
    instructions: &'a [Instruction],
    fp_registers: &'a RegisterFile,
    int_registers: &'a RegisterFile,
    stats: &'a SimStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    events: Option<&'a [Event]>,
}

fn print_json(sim: &Simulator, trace: bool) -> Result<()> {
    let report = Report {
        cycles: sim.cycle(),
        complete: sim.is_complete(),
        config: sim.config(),
        instructions: sim.instructions(),
        fp_registers: sim.registers(RegClass::Float),
        int_registers: sim.registers(RegClass::Int),
        stats: sim.stats(),
        events: trace.then(|| sim.events()),
    };
    let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
    println!("{json}");
    Ok(())
}

fn print_report(sim: &Simulator, trace: bool) {
    if trace {
        println!("EVENT LOG");
        for event in sim.events() {
            println!("{event}");
        }
        println!();
    }

    println!(
        "{:>3}  {:<22} {:>6} {:>6} {:>6} {:>6}",
        "#", "Instruction", "Issue", "Start", "End", "Write"
    );
    for inst in sim.instructions() {
        let t = inst.timing;
        println!(
            "{:>3}  {:<22} {:>6} {:>6} {:>6} {:>6}",
            inst.id,
            inst.to_string(),
            cell(t.issued),
            cell(t.exec_start),
            cell(t.exec_end),
            cell(t.write),
        );
    }
    println!();

    for class in RegClass::ALL {
        print_registers(sim.registers(class));
    }
    println!();
    println!("{}", sim.stats());
}

fn cell(stamp: Option<Cycle>) -> String {
    stamp.map_or_else(|| "-".to_string(), |c| c.to_string())
}

fn print_registers(file: &RegisterFile) {
    let cells: Vec<String> = file
        .iter()
        .map(|(reg, value)| format!("{:<4}= {:<10}", reg.to_string(), value.to_string()))
        .collect();
    for row in cells.chunks(4) {
        println!("  {}", row.join("  ").trim_end());
    }
}
