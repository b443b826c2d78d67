//! `fmsta` CLI — drives the FM partitioner and the STA engine.
//!
//! `fmsta partition <input.json>` runs a two-way min-cut partition and
//! writes the `Cutsize = ...` / `G1 ...` / `G2 ...` text format.
//! `fmsta sta <netlist.json> <library.json>` runs a full forward/backward
//! timing analysis and writes the `ckt_traversal.txt` text format.

#![warn(missing_docs)]

mod error;
mod partition;
mod sta;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

pub use error::CliError;

/// fmsta — an FM two-way min-cut partitioner and block-based static
/// timing analyzer.
#[derive(Parser, Debug)]
#[command(name = "fmsta", version, about = "FM partitioner + static timing analyzer")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Echo every diagnostic (not just errors) to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file overriding `RunConfig` defaults.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the FM two-way min-cut partitioner.
    Partition(PartitionArgs),
    /// Run static timing analysis over a gate-level netlist.
    Sta(StaArgs),
}

/// Arguments for the `fmsta partition` subcommand.
#[derive(Parser, Debug)]
pub struct PartitionArgs {
    /// Path to a JSON `PartitionInput` document.
    pub input: PathBuf,

    /// Overrides the input's (or config's) balance factor.
    #[arg(long)]
    pub balance: Option<f64>,

    /// Output file path; defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `fmsta sta` subcommand.
#[derive(Parser, Debug)]
pub struct StaArgs {
    /// Path to a JSON `GateNetlistInput` document.
    pub netlist: PathBuf,

    /// Path to a JSON `CellLibrary` document.
    pub library: PathBuf,

    /// Clock period in ns; if given, a warning is printed to stderr (not
    /// to the result file) when the computed circuit delay exceeds it.
    #[arg(long = "clock-period")]
    pub clock_period_ns: Option<f64>,

    /// Output file path; defaults to stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to echo every diagnostic (not just errors) to stderr.
    pub verbose: bool,
    /// Optional path to a custom TOML config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Partition(ref args) => partition::run(args, &global),
        Command::Sta(ref args) => sta::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Loads a `RunConfig` from the given path, or the documented defaults if
/// `path` is `None`.
fn load_run_config(path: Option<&std::path::Path>) -> Result<fmsta_config::RunConfig, CliError> {
    match path {
        Some(p) => Ok(fmsta_config::load_config(p)?),
        None => Ok(fmsta_config::RunConfig::default()),
    }
}
