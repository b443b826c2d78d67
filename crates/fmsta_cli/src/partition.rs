//! `fmsta partition` — runs the FM two-way min-cut partitioner.

use std::fs;
use std::io::Write;

use fmsta_fm::{format_output, FmEngine, Netlist, PartitionInput};

use crate::{load_run_config, CliError, GlobalArgs, PartitionArgs};

/// Runs the `fmsta partition` command.
///
/// Returns the process exit code: `0` on success.
pub fn run(args: &PartitionArgs, global: &GlobalArgs) -> Result<i32, CliError> {
    let config = load_run_config(global.config.as_deref())?;

    let text = fs::read_to_string(&args.input).map_err(|source| CliError::Io {
        path: args.input.display().to_string(),
        source,
    })?;
    let mut input: PartitionInput =
        serde_json::from_str(&text).map_err(|source| CliError::Json {
            path: args.input.display().to_string(),
            source,
        })?;

    if let Some(balance) = args.balance {
        input.balance_factor = balance;
    }

    let mut netlist = Netlist::from_input(&input)?;
    let mut engine = FmEngine::new(&mut netlist, input.balance_factor)?;
    let run_report = engine.run(&config)?;

    if global.verbose && !global.quiet {
        eprintln!(
            "   partition: {} pass(es), cut {} -> {}",
            run_report.passes.len(),
            run_report.initial_cut,
            run_report.final_cut
        );
    }

    let text = format_output(&engine.assignment(), engine.cut_size());

    match &args.output {
        Some(path) => {
            fs::write(path, &text).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout.write_all(text.as_bytes()).map_err(|source| CliError::Io {
                path: "<stdout>".to_string(),
                source,
            })?;
        }
    }

    Ok(0)
}
