//! Kahn's-algorithm topological ordering over the gate DAG.

use std::collections::VecDeque;

use fmsta_diagnostics::{Category, Diagnostic, DiagnosticCode, DiagnosticSink};

use crate::error::StaError;
use crate::ids::GateId;
use crate::netlist::Netlist;

/// A topological order over a [`Netlist`]'s nodes: every node appears
/// after all of its fan-ins.
#[derive(Debug, Clone)]
pub struct TopologicalOrder {
    order: Vec<GateId>,
}

impl TopologicalOrder {
    /// Computes a topological order via Kahn's algorithm.
    ///
    /// A fan-out entry referencing a node id beyond the netlist's arena
    /// bounds is a dangling reference: it is dropped from the in-degree
    /// computation and reported on `sink` as a warning rather than
    /// failing the whole run (this can only arise from a hand-built
    /// [`Netlist`] with inconsistent edges — [`Netlist::from_input`]
    /// never produces one). A genuine cycle among real nodes still fails
    /// with [`StaError::CycleDetected`].
    pub fn compute(net: &Netlist, sink: &DiagnosticSink) -> Result<Self, StaError> {
        let n = net.node_count();
        let mut in_degree = vec![0usize; n];

        for (_, node) in net.nodes() {
            for &fanin in &node.fan_in {
                let idx = fanin.as_raw() as usize;
                if idx >= n {
                    sink.emit(Diagnostic::warning(
                        DiagnosticCode::new(Category::Timing, 1),
                        format!(
                            "node '{}' has a dangling fan-in reference (id {} out of range)",
                            node.name,
                            fanin.as_raw()
                        ),
                    ));
                    continue;
                }
                in_degree[idx] += 1;
            }
        }

        let mut queue: VecDeque<GateId> = (0..n as u32)
            .map(GateId::from_raw)
            .filter(|id| in_degree[id.as_raw() as usize] == 0)
            .collect();

        let mut order = Vec::with_capacity(n);
        while let Some(id) = queue.pop_front() {
            order.push(id);
            for &succ in &net.node(id).fan_out {
                let idx = succ.as_raw() as usize;
                if idx >= n {
                    sink.emit(Diagnostic::warning(
                        DiagnosticCode::new(Category::Timing, 2),
                        format!(
                            "node '{}' has a dangling fan-out reference (id {} out of range)",
                            net.node(id).name,
                            succ.as_raw()
                        ),
                    ));
                    continue;
                }
                in_degree[idx] -= 1;
                if in_degree[idx] == 0 {
                    queue.push_back(succ);
                }
            }
        }

        if order.len() < n {
            let placed: std::collections::HashSet<GateId> = order.iter().copied().collect();
            let mut remaining: Vec<GateId> = (0..n as u32)
                .map(GateId::from_raw)
                .filter(|id| !placed.contains(id))
                .collect();
            remaining.sort();
            let first = remaining[0];
            return Err(StaError::CycleDetected { remaining, first });
        }

        Ok(TopologicalOrder { order })
    }

    /// The order, forward (every node after its fan-ins).
    pub fn forward(&self) -> &[GateId] {
        &self.order
    }

    /// The order, reversed (every node before its fan-ins) — used for the
    /// backward (required-time) traversal.
    pub fn reverse(&self) -> impl Iterator<Item = GateId> + '_ {
        self.order.iter().rev().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::netlist::{GateNetlistInput, GateStatement};

    fn chain() -> Netlist {
        let input = GateNetlistInput {
            statements: vec![
                GateStatement::Input { name: "a".into() },
                GateStatement::Gate {
                    output: "b".into(),
                    gate_type: "BUF".into(),
                    inputs: vec!["a".into()],
                },
                GateStatement::Gate {
                    output: "c".into(),
                    gate_type: "BUF".into(),
                    inputs: vec!["b".into()],
                },
                GateStatement::Output { name: "c".into() },
            ],
        };
        Netlist::from_input(&input).unwrap()
    }

    #[test]
    fn chain_orders_linearly() {
        let net = chain();
        let sink = DiagnosticSink::new();
        let order = TopologicalOrder::compute(&net, &sink).unwrap();
        assert_eq!(order.forward().len(), net.node_count());
        let names: Vec<&str> = order
            .forward()
            .iter()
            .map(|&id| net.node(id).name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "c", "c"]);
        assert!(!sink.has_errors());
    }

    #[test]
    fn reverse_is_exact_reverse_of_forward() {
        let net = chain();
        let sink = DiagnosticSink::new();
        let order = TopologicalOrder::compute(&net, &sink).unwrap();
        let fwd: Vec<GateId> = order.forward().to_vec();
        let rev: Vec<GateId> = order.reverse().collect();
        let mut expected = fwd.clone();
        expected.reverse();
        assert_eq!(rev, expected);
    }

    #[test]
    fn two_node_cycle_is_detected() {
        // x = NAND(y); y = NAND(x) — both names are registered before
        // fan-ins are wired, so `from_input` accepts the mutual reference
        // and the cycle surfaces at topological-order time, not parse time.
        let input = GateNetlistInput {
            statements: vec![
                GateStatement::Gate {
                    output: "x".into(),
                    gate_type: "NAND".into(),
                    inputs: vec!["y".into()],
                },
                GateStatement::Gate {
                    output: "y".into(),
                    gate_type: "NAND".into(),
                    inputs: vec!["x".into()],
                },
            ],
        };
        let net = Netlist::from_input(&input).unwrap();
        let sink = DiagnosticSink::new();
        let err = TopologicalOrder::compute(&net, &sink).unwrap_err();
        match err {
            StaError::CycleDetected { remaining, .. } => assert_eq!(remaining.len(), 2),
            other => panic!("expected CycleDetected, got {other:?}"),
        }
    }

    #[test]
    fn empty_netlist_orders_trivially() {
        let net = Netlist::new();
        let sink = DiagnosticSink::new();
        let order = TopologicalOrder::compute(&net, &sink).unwrap();
        assert!(order.forward().is_empty());
    }
}
