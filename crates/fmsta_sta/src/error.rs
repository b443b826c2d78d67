//! Error type for gate-netlist construction, topological ordering, and
//! timing analysis.

use crate::ids::GateId;

/// Fatal conditions surfaced by [`crate::netlist`], [`crate::topo`], or
/// [`crate::engine`].
#[derive(Debug, thiserror::Error)]
pub enum StaError {
    /// The gate DAG contains a cycle; topological ordering could not place
    /// every node.
    #[error("cycle detected: {} node(s) could not be topologically ordered, starting at {first:?}", .remaining.len())]
    CycleDetected {
        /// Ids of every node left unplaced when Kahn's algorithm stalled.
        remaining: Vec<GateId>,
        /// The lowest-id unplaced node, named for a concise diagnostic.
        first: GateId,
    },

    /// A gate references a cell type absent from the supplied library.
    #[error("unknown gate type '{gate_type}' for node '{node_name}'")]
    UnknownGateType {
        /// The offending gate type, as written in the netlist.
        gate_type: String,
        /// The name of the node that referenced it.
        node_name: String,
    },

    /// The structured input failed a well-formedness check (e.g. a
    /// statement referencing an undeclared signal name).
    #[error("malformed STA input: {0}")]
    InputMalformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_cycle_detected() {
        let err = StaError::CycleDetected {
            remaining: vec![GateId::from_raw(3), GateId::from_raw(5)],
            first: GateId::from_raw(3),
        };
        assert!(format!("{err}").contains("2 node(s)"));
    }

    #[test]
    fn display_unknown_gate_type() {
        let err = StaError::UnknownGateType {
            gate_type: "XOR3".to_string(),
            node_name: "n10".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "unknown gate type 'XOR3' for node 'n10'"
        );
    }

    #[test]
    fn display_input_malformed() {
        let err = StaError::InputMalformed("OUTPUT references unknown signal 'z'".to_string());
        assert_eq!(
            format!("{err}"),
            "malformed STA input: OUTPUT references unknown signal 'z'"
        );
    }
}
