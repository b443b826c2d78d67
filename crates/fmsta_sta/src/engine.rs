//! Forward (arrival/slew) and backward (required/slack) traversal, and
//! critical-path recovery.

use fmsta_config::RunConfig;
use fmsta_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};
use fmsta_library::CellLibrary;

use crate::error::StaError;
use crate::ids::GateId;
use crate::netlist::{GateKind, Netlist};
use crate::topo::TopologicalOrder;

/// Gate types whose fan-in count never triggers the multi-input delay
/// scaling heuristic.
const SINGLE_INPUT_GATE_TYPES: [&str; 4] = ["INV", "BUF", "NOT", "BUFF"];

fn scale_factor(gate_type: &str, fan_in_count: usize) -> f64 {
    if !SINGLE_INPUT_GATE_TYPES.contains(&gate_type) && fan_in_count > 2 {
        fan_in_count as f64 / 2.0
    } else {
        1.0
    }
}

/// The result of a complete `run()`: the circuit delay and the recovered
/// critical path. Per-node arrival/slew/required/slack live on the
/// [`Netlist`] itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    /// Maximum arrival time among all primary-output markers, in ps.
    pub circuit_delay_ps: f64,
    /// Node ids from a primary input to the worst-arrival primary-output
    /// marker, inclusive. Empty if the netlist has no primary outputs.
    pub critical_path: Vec<GateId>,
}

/// Computes each node's load capacitance: the sum of the input-pin
/// capacitance of every non-marker fan-out, or a configured default if
/// every fan-out is a marker (or there are no fan-outs at all).
///
/// Indexed by `GateId::as_raw()`. Cached once per `run()`, as required.
fn compute_load_caps(
    net: &Netlist,
    library: &CellLibrary,
    config: &RunConfig,
    sink: &DiagnosticSink,
) -> Vec<f64> {
    let inv_cap = library.get("INV").map(|e| e.capacitance_ff).unwrap_or_else(|| {
        sink.emit(Diagnostic::warning(
            DiagnosticCode::new(Category::Library, 1),
            "no INV entry in library; defaulting sink load capacitance to 0.0 fF",
        ));
        0.0
    });
    let default_load = config.default_sink_load_factor * inv_cap;

    let n = net.node_count();
    let mut caps = vec![0.0; n];
    for (id, node) in net.nodes() {
        let idx = id.as_raw() as usize;
        if node.fan_out.is_empty() || node.fan_out.iter().all(|&f| net.node(f).is_marker()) {
            caps[idx] = default_load;
            continue;
        }
        let mut sum = 0.0;
        for &f in &node.fan_out {
            let fnode = net.node(f);
            if let GateKind::Gate { gate_type } = &fnode.kind {
                if let Some(entry) = library.get(gate_type) {
                    sum += entry.capacitance_ff;
                }
            }
        }
        caps[idx] = sum;
    }
    caps
}

/// Runs forward traversal, backward traversal, and critical-path
/// recovery over `net`, populating every node's timing state.
pub fn run(
    net: &mut Netlist,
    library: &CellLibrary,
    config: &RunConfig,
    sink: &DiagnosticSink,
) -> Result<RunReport, StaError> {
    net.reset_timing();
    let order = TopologicalOrder::compute(net, sink)?;
    let load_caps = compute_load_caps(net, library, config, sink);

    forward_pass(net, &order, library, config, &load_caps)?;

    let circuit_delay_ps = net
        .primary_outputs()
        .map(|id| net.node(id).timing.arrival_ps)
        .fold(0.0_f64, f64::max);

    backward_pass(
        net,
        &order,
        library,
        config,
        &load_caps,
        circuit_delay_ps,
    )?;

    let critical_path = critical_path(net);

    Ok(RunReport {
        circuit_delay_ps,
        critical_path,
    })
}

fn forward_pass(
    net: &mut Netlist,
    order: &TopologicalOrder,
    library: &CellLibrary,
    config: &RunConfig,
    load_caps: &[f64],
) -> Result<(), StaError> {
    for id in order.forward().iter().copied() {
        let computed: Result<(f64, f64), StaError> = (|| {
            let node = net.node(id);
            match &node.kind {
                GateKind::PrimaryInput => Ok((0.0, config.default_input_slew_ps)),
                GateKind::Marker => {
                    let driver = match node.fan_in.first() {
                        Some(&d) => d,
                        None => return Ok((0.0, config.default_input_slew_ps)),
                    };
                    let d = net.node(driver);
                    Ok((d.timing.arrival_ps, d.timing.output_slew_ps))
                }
                GateKind::Gate { gate_type } => {
                    let entry = library.get(gate_type).ok_or_else(|| StaError::UnknownGateType {
                        gate_type: gate_type.clone(),
                        node_name: node.name.clone(),
                    })?;
                    let load = load_caps[id.as_raw() as usize];
                    let scale = scale_factor(gate_type, node.fan_in.len());
                    let mut best: Option<(f64, f64)> = None;
                    for &d in &node.fan_in {
                        let dn = net.node(d);
                        let delay =
                            entry.delay_ps(dn.timing.output_slew_ps, load) * scale;
                        let slew = entry.output_slew_ps(dn.timing.output_slew_ps, load);
                        let candidate = dn.timing.arrival_ps + delay;
                        best = Some(match best {
                            None => (candidate, slew),
                            Some((ba, bs)) => {
                                if candidate > ba || (candidate == ba && slew > bs) {
                                    (candidate, slew)
                                } else {
                                    (ba, bs)
                                }
                            }
                        });
                    }
                    Ok(best.unwrap_or((0.0, config.default_input_slew_ps)))
                }
            }
        })();
        let (arrival, slew) = computed?;
        let node = net.node_mut(id);
        node.timing.arrival_ps = arrival;
        node.timing.output_slew_ps = slew;
    }
    Ok(())
}

fn backward_pass(
    net: &mut Netlist,
    order: &TopologicalOrder,
    library: &CellLibrary,
    config: &RunConfig,
    load_caps: &[f64],
    circuit_delay_ps: f64,
) -> Result<(), StaError> {
    let n = net.node_count();
    let req_at_sinks = if circuit_delay_ps == 0.0 {
        f64::MIN_POSITIVE
    } else {
        config.clock_margin * circuit_delay_ps
    };

    let mut required = vec![f64::INFINITY; n];
    for id in net.primary_outputs() {
        required[id.as_raw() as usize] = req_at_sinks;
    }

    for id in order.reverse() {
        let node = net.node(id);
        if node.fan_out.is_empty() {
            continue;
        }
        let computed: Result<f64, StaError> = (|| {
            let mut best = f64::INFINITY;
            for &v in &node.fan_out {
                let vn = net.node(v);
                let candidate = if vn.is_marker() {
                    required[v.as_raw() as usize]
                } else {
                    let GateKind::Gate { gate_type } = &vn.kind else {
                        unreachable!("non-marker fan-out must be a gate");
                    };
                    let entry =
                        library.get(gate_type).ok_or_else(|| StaError::UnknownGateType {
                            gate_type: gate_type.clone(),
                            node_name: vn.name.clone(),
                        })?;
                    let load_v = load_caps[v.as_raw() as usize];
                    let scale_v = scale_factor(gate_type, vn.fan_in.len());
                    let delay_v =
                        entry.delay_ps(node.timing.output_slew_ps, load_v) * scale_v;
                    required[v.as_raw() as usize] - delay_v
                };
                best = best.min(candidate);
            }
            Ok(best)
        })();
        required[id.as_raw() as usize] = computed?;
    }

    for i in 0..n {
        let id = GateId::from_raw(i as u32);
        let node = net.node_mut(id);
        node.timing.required_ps = required[i];
        node.timing.slack_ps = required[i] - node.timing.arrival_ps;
    }

    Ok(())
}

fn pick_better_fanin(net: &Netlist, a: GateId, b: GateId) -> GateId {
    let na = net.node(a).timing;
    let nb = net.node(b).timing;
    if nb.slack_ps < na.slack_ps {
        return b;
    }
    if nb.slack_ps > na.slack_ps {
        return a;
    }
    if nb.arrival_ps > na.arrival_ps {
        return b;
    }
    if nb.arrival_ps < na.arrival_ps {
        return a;
    }
    if b.as_raw() < a.as_raw() {
        b
    } else {
        a
    }
}

fn critical_path(net: &Netlist) -> Vec<GateId> {
    let mut sink_id: Option<GateId> = None;
    for id in net.primary_outputs() {
        sink_id = Some(match sink_id {
            None => id,
            Some(current) => {
                if net.node(id).timing.arrival_ps > net.node(current).timing.arrival_ps {
                    id
                } else {
                    current
                }
            }
        });
    }
    let Some(sink_id) = sink_id else {
        return Vec::new();
    };

    let Some(&first_driver) = net.node(sink_id).fan_in.first() else {
        return Vec::new();
    };

    let mut seq = Vec::new();
    let mut current = first_driver;
    loop {
        seq.push(current);
        let node = net.node(current);
        if node.fan_in.is_empty() {
            break;
        }
        let mut chosen = node.fan_in[0];
        for &cand in &node.fan_in[1..] {
            chosen = pick_better_fanin(net, chosen, cand);
        }
        current = chosen;
    }
    seq.reverse();
    seq.push(sink_id);
    seq
}
