//! `fmsta sta` — runs forward/backward static timing analysis.

use std::fs;
use std::io::Write;

use fmsta_diagnostics::{Diagnostic, DiagnosticSink, Severity};
use fmsta_library::CellLibrary;
use fmsta_sta::{format, GateNetlistInput, Netlist};

use crate::{load_run_config, CliError, GlobalArgs, StaArgs};

/// Runs the `fmsta sta` command.
///
/// Returns the process exit code: `0` on success.
pub fn run(args: &StaArgs, global: &GlobalArgs) -> Result<i32, CliError> {
    let config = load_run_config(global.config.as_deref())?;

    let netlist_text = fs::read_to_string(&args.netlist).map_err(|source| CliError::Io {
        path: args.netlist.display().to_string(),
        source,
    })?;
    let netlist_input: GateNetlistInput =
        serde_json::from_str(&netlist_text).map_err(|source| CliError::Json {
            path: args.netlist.display().to_string(),
            source,
        })?;

    let library_text = fs::read_to_string(&args.library).map_err(|source| CliError::Io {
        path: args.library.display().to_string(),
        source,
    })?;
    let library_entries = serde_json::from_str(&library_text).map_err(|source| CliError::Json {
        path: args.library.display().to_string(),
        source,
    })?;
    let library = CellLibrary::new(library_entries)?;

    let mut net = Netlist::from_input(&netlist_input)?;
    let sink = DiagnosticSink::new();
    let report = fmsta_sta::run(&mut net, &library, &config, &sink)?;

    if !global.quiet {
        for diag in sink.diagnostics() {
            if global.verbose || diag.severity >= Severity::Warning {
                eprintln!("{}: {}", diag.code, diag.message);
            }
        }
    }

    if let Some(period_ns) = args.clock_period_ns {
        let period_ps = period_ns * 1000.0;
        if report.circuit_delay_ps > period_ps && !global.quiet {
            let warning = Diagnostic::warning(
                fmsta_diagnostics::DiagnosticCode::new(fmsta_diagnostics::Category::Timing, 99),
                format!(
                    "circuit delay {:.2} ps exceeds the supplied clock period {:.2} ps",
                    report.circuit_delay_ps, period_ps
                ),
            );
            eprintln!("{}: {}", warning.code, warning.message);
        }
    }

    let text = format::render(&net, &report);

    match &args.output {
        Some(path) => {
            fs::write(path, &text).map_err(|source| CliError::Io {
                path: path.display().to_string(),
                source,
            })?;
        }
        None => {
            let mut stdout = std::io::stdout();
            stdout
                .write_all(text.as_bytes())
                .map_err(|source| CliError::Io {
                    path: "<stdout>".to_string(),
                    source,
                })?;
        }
    }

    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    fn flat_table_json(value_ns: f64) -> String {
        let row = format!(
            "[{v},{v},{v},{v},{v},{v},{v}]",
            v = value_ns
        );
        format!(
            r#"{{"index_1":[0.1,0.2,0.3,0.4,0.5,0.6,0.7],"index_2":[1.0,2.0,3.0,4.0,5.0,6.0,7.0],"values":[{row},{row},{row},{row},{row},{row},{row}]}}"#,
        )
    }

    #[test]
    fn sta_end_to_end_writes_output_file() {
        let tmp = TempDir::new().unwrap();
        let netlist_json = r#"{
            "statements": [
                {"kind": "input", "name": "a"},
                {"kind": "gate", "output": "b", "gate_type": "BUF", "inputs": ["a"]},
                {"kind": "output", "name": "b"}
            ]
        }"#;
        let netlist_path = write_file(&tmp, "net.json", netlist_json);

        let table = flat_table_json(1.0);
        let library_json = format!(
            r#"{{"BUF": {{"capacitance_ff": 1.0, "cell_delay": {table}, "output_slew": {table}}},
                 "INV": {{"capacitance_ff": 1.0, "cell_delay": {table}, "output_slew": {table}}}}}"#
        );
        let library_path = write_file(&tmp, "lib.json", &library_json);
        let output_path = tmp.path().join("ckt_traversal.txt");

        let args = StaArgs {
            netlist: netlist_path,
            library: library_path,
            clock_period_ns: None,
            output: Some(output_path.clone()),
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        };

        let code = run(&args, &global).unwrap();
        assert_eq!(code, 0);

        let out = fs::read_to_string(&output_path).unwrap();
        assert!(out.starts_with("Circuit delay: "));
        assert!(out.contains("Gate slacks:"));
        assert!(out.contains("Critical path:"));
    }

    #[test]
    fn missing_netlist_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let library_path = write_file(&tmp, "lib.json", "{}");
        let args = StaArgs {
            netlist: PathBuf::from("/nonexistent/net.json"),
            library: library_path,
            clock_period_ns: None,
            output: None,
        };
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: None,
        };
        let err = run(&args, &global).unwrap_err();
        assert!(matches!(err, CliError::Io { .. }));
    }
}
