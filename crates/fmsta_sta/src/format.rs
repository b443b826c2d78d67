//! Text rendering of a completed timing run, matching the
//! `ckt_traversal.txt` layout: circuit delay, per-node slacks in
//! ascending id order, then the critical path.

use std::fmt::Write as _;

use crate::engine::RunReport;
use crate::ids::GateId;
use crate::netlist::{GateKind, Netlist};

/// The display prefix for a node: `INP` for primary inputs, `OUT` for
/// timing endpoints (true primary outputs and DFF data-pin markers),
/// otherwise the upper-cased gate type.
fn prefix(net: &Netlist, id: GateId) -> String {
    let node = net.node(id);
    if node.is_primary_output {
        "OUT".to_string()
    } else {
        match &node.kind {
            GateKind::PrimaryInput => "INP".to_string(),
            GateKind::Marker => "OUT".to_string(),
            GateKind::Gate { gate_type } => gate_type.clone(),
        }
    }
}

/// Renders a completed run as the `ckt_traversal.txt` text report.
pub fn render(net: &Netlist, report: &RunReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Circuit delay: {:.2} ps", report.circuit_delay_ps);
    let _ = writeln!(out);
    let _ = writeln!(out, "Gate slacks:");

    let mut ids: Vec<GateId> = net.nodes().map(|(id, _)| id).collect();
    ids.sort_by_key(GateId::as_raw);
    for id in ids {
        let node = net.node(id);
        let _ = writeln!(
            out,
            "{}-n{}: {:.2} ps",
            prefix(net, id),
            node.name,
            node.timing.slack_ps
        );
    }
    let _ = writeln!(out);

    let path_str = report
        .critical_path
        .iter()
        .map(|&id| format!("{}-n{}", prefix(net, id), net.node(id).name))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(out, "Critical path:");
    let _ = writeln!(out, "{path_str}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::run;
    use crate::netlist::{GateNetlistInput, GateStatement, Netlist};
    use fmsta_config::RunConfig;
    use fmsta_diagnostics::DiagnosticSink;
    use fmsta_library::{CellEntry, CellLibrary, LookupTable};
    use std::collections::HashMap;

    fn flat_table(value_ns: f64) -> LookupTable {
        LookupTable {
            index_1: [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
            index_2: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            values: [[value_ns; 7]; 7],
        }
    }

    fn library() -> CellLibrary {
        let mut entries = HashMap::new();
        entries.insert(
            "BUF".to_string(),
            CellEntry {
                capacitance_ff: 1.0,
                cell_delay: flat_table(1.0),
                output_slew: flat_table(1.0),
            },
        );
        entries.insert(
            "INV".to_string(),
            CellEntry {
                capacitance_ff: 1.0,
                cell_delay: flat_table(1.0),
                output_slew: flat_table(1.0),
            },
        );
        CellLibrary::new(entries).unwrap()
    }

    #[test]
    fn renders_expected_sections_and_prefixes() {
        let input = GateNetlistInput {
            statements: vec![
                GateStatement::Input { name: "a".into() },
                GateStatement::Gate {
                    output: "b".into(),
                    gate_type: "BUF".into(),
                    inputs: vec!["a".into()],
                },
                GateStatement::Output { name: "b".into() },
            ],
        };
        let mut net = Netlist::from_input(&input).unwrap();
        let config = RunConfig::default();
        let sink = DiagnosticSink::new();
        let report = run(&mut net, &library(), &config, &sink).unwrap();
        let text = render(&net, &report);

        assert!(text.starts_with("Circuit delay: "));
        assert!(text.contains("Gate slacks:"));
        assert!(text.contains("INP-na: "));
        assert!(text.contains("BUF-nb: "));
        assert!(text.contains("OUT-nb: "));
        assert!(text.contains("Critical path:"));
        assert!(text.contains("INP-na, BUF-nb, OUT-nb"));
    }

    #[test]
    fn ids_listed_in_ascending_order() {
        let input = GateNetlistInput {
            statements: vec![
                GateStatement::Input { name: "z".into() },
                GateStatement::Input { name: "a".into() },
                GateStatement::Gate {
                    output: "m".into(),
                    gate_type: "BUF".into(),
                    inputs: vec!["z".into()],
                },
                GateStatement::Output { name: "m".into() },
            ],
        };
        let mut net = Netlist::from_input(&input).unwrap();
        let config = RunConfig::default();
        let sink = DiagnosticSink::new();
        let report = run(&mut net, &library(), &config, &sink).unwrap();
        let text = render(&net, &report);

        let slacks_section = text.split("Gate slacks:").nth(1).unwrap();
        let pos_z = slacks_section.find("nz:").unwrap();
        let pos_a = slacks_section.find("na:").unwrap();
        let pos_m = slacks_section.find("nm:").unwrap();
        assert!(pos_z < pos_a);
        assert!(pos_a < pos_m);
    }
}
