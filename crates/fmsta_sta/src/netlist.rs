//! Gate-level DAG for static timing analysis.

use std::collections::HashMap;

use fmsta_common::Arena;
use serde::{Deserialize, Serialize};

use crate::error::StaError;
use crate::ids::GateId;

/// What kind of node this is, for forward/backward traversal purposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateKind {
    /// A primary input, or a DFF's pseudo-input (the `Q` side of a
    /// `<out> = DFF(<in>)` statement): `arrival = 0`, `outputSlew` set to
    /// the configured default.
    PrimaryInput,
    /// A combinational gate of the named type, looked up in the
    /// [`fmsta_library::CellLibrary`] at traversal time.
    Gate {
        /// Upper-cased gate-type name.
        gate_type: String,
    },
    /// A sink marker with exactly one fan-in: a primary output, or a
    /// DFF's pseudo-output (the `D` side of a `<out> = DFF(<in>)`
    /// statement). Inherits `arrival`/`outputSlew` unchanged from its
    /// single driver; contributes no delay of its own.
    Marker,
}

/// Timing state populated by [`crate::engine`]; reset at the start of
/// every `run()`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingState {
    /// Earliest time a transition can arrive at this node, in ps.
    pub arrival_ps: f64,
    /// Interpolated output slew at this node, in ps.
    pub output_slew_ps: f64,
    /// Latest time a transition may arrive without a timing violation, ps.
    pub required_ps: f64,
    /// `required_ps - arrival_ps`.
    pub slack_ps: f64,
}

impl TimingState {
    /// The zeroed, unanalyzed state every node starts a `run()` in.
    pub const UNSET: TimingState = TimingState {
        arrival_ps: 0.0,
        output_slew_ps: 0.0,
        required_ps: f64::INFINITY,
        slack_ps: 0.0,
    };
}

/// A node in the gate DAG.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateNode {
    /// Human-readable name, as declared in the input.
    pub name: String,
    /// What kind of node this is.
    pub kind: GateKind,
    /// Declared fan-in count (equal to `fan_in.len()` for any netlist built
    /// by [`Netlist::from_input`]; kept as a separate field to match the
    /// data model and to let hand-built netlists assert consistency).
    pub declared_fanin_count: usize,
    /// Driver node ids, order preserved.
    pub fan_in: Vec<GateId>,
    /// Nodes this node drives.
    pub fan_out: Vec<GateId>,
    /// Whether this node is a timing endpoint (a true primary output, or
    /// a DFF's data-pin marker).
    pub is_primary_output: bool,
    /// Timing state, populated by a `run()` call.
    pub timing: TimingState,
}

impl GateNode {
    /// Whether this is a [`GateKind::PrimaryInput`] node.
    pub fn is_primary_input(&self) -> bool {
        matches!(self.kind, GateKind::PrimaryInput)
    }

    /// Whether this is a [`GateKind::Marker`] node.
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, GateKind::Marker)
    }
}

/// A gate DAG: nodes and the fan-in/fan-out edges between them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Netlist {
    nodes: Arena<GateId, GateNode>,
}

impl Netlist {
    /// An empty netlist.
    pub fn new() -> Self {
        Netlist::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Iterates over `(id, node)` pairs in allocation order.
    pub fn nodes(&self) -> impl Iterator<Item = (GateId, &GateNode)> {
        self.nodes.iter()
    }

    /// Returns the node with the given id.
    pub fn node(&self, id: GateId) -> &GateNode {
        self.nodes.get(id)
    }

    /// Returns a mutable reference to the node with the given id.
    pub fn node_mut(&mut self, id: GateId) -> &mut GateNode {
        self.nodes.get_mut(id)
    }

    /// Resets every node's timing state to [`TimingState::UNSET`].
    pub fn reset_timing(&mut self) {
        for (_, node) in self.nodes.iter_mut() {
            node.timing = TimingState::UNSET;
        }
    }

    /// All nodes flagged as timing endpoints (true primary outputs, and
    /// DFF data-pin markers).
    pub fn primary_outputs(&self) -> impl Iterator<Item = GateId> + '_ {
        self.nodes
            .iter()
            .filter(|(_, n)| n.is_primary_output)
            .map(|(id, _)| id)
    }

    fn alloc(&mut self, name: String, kind: GateKind) -> GateId {
        self.nodes.alloc(GateNode {
            name,
            kind,
            declared_fanin_count: 0,
            fan_in: Vec::new(),
            fan_out: Vec::new(),
            is_primary_output: false,
            timing: TimingState::UNSET,
        })
    }

    /// Builds a netlist from ISCAS-89-style statements.
    ///
    /// Gate type names are upper-cased. `OUTPUT(name)` and the data-pin
    /// half of `DFF(name)` both reference an *existing* signal by name and
    /// append a new [`GateKind::Marker`] node with that signal as its sole
    /// fan-in, rather than re-flagging the producing node itself — this
    /// keeps "node with a real gate delay" and "zero-delay sink marker"
    /// as distinct node kinds, matching the forward/backward traversal's
    /// own case split.
    pub fn from_input(input: &GateNetlistInput) -> Result<Netlist, StaError> {
        let mut net = Netlist::new();
        let mut by_name: HashMap<String, GateId> = HashMap::new();

        for stmt in &input.statements {
            match stmt {
                GateStatement::Input { name } => {
                    let id = net.alloc(name.clone(), GateKind::PrimaryInput);
                    by_name.insert(name.clone(), id);
                }
                GateStatement::Dff { output, .. } => {
                    let id = net.alloc(output.clone(), GateKind::PrimaryInput);
                    by_name.insert(output.clone(), id);
                }
                GateStatement::Gate { output, gate_type, .. } => {
                    let id = net.alloc(
                        output.clone(),
                        GateKind::Gate {
                            gate_type: gate_type.to_uppercase(),
                        },
                    );
                    by_name.insert(output.clone(), id);
                }
                GateStatement::Output { .. } => {}
            }
        }

        for stmt in &input.statements {
            if let GateStatement::Gate { output, inputs, .. } = stmt {
                let node_id = *by_name.get(output).expect("just inserted above");
                let mut fan_in = Vec::with_capacity(inputs.len());
                for in_name in inputs {
                    let driver = *by_name.get(in_name).ok_or_else(|| {
                        StaError::InputMalformed(format!(
                            "gate '{output}' references undeclared signal '{in_name}'"
                        ))
                    })?;
                    fan_in.push(driver);
                    net.node_mut(driver).fan_out.push(node_id);
                }
                let declared = fan_in.len();
                let node = net.node_mut(node_id);
                node.fan_in = fan_in;
                node.declared_fanin_count = declared;
            }
        }

        for stmt in &input.statements {
            match stmt {
                GateStatement::Output { name } => {
                    let driver = *by_name.get(name).ok_or_else(|| {
                        StaError::InputMalformed(format!(
                            "OUTPUT references undeclared signal '{name}'"
                        ))
                    })?;
                    let marker = net.alloc(name.clone(), GateKind::Marker);
                    net.node_mut(marker).fan_in = vec![driver];
                    net.node_mut(marker).declared_fanin_count = 1;
                    net.node_mut(marker).is_primary_output = true;
                    net.node_mut(driver).fan_out.push(marker);
                }
                GateStatement::Dff { input, .. } => {
                    let driver = *by_name.get(input).ok_or_else(|| {
                        StaError::InputMalformed(format!(
                            "DFF references undeclared data-pin signal '{input}'"
                        ))
                    })?;
                    let marker = net.alloc(input.clone(), GateKind::Marker);
                    net.node_mut(marker).fan_in = vec![driver];
                    net.node_mut(marker).declared_fanin_count = 1;
                    net.node_mut(marker).is_primary_output = true;
                    net.node_mut(driver).fan_out.push(marker);
                }
                _ => {}
            }
        }

        Ok(net)
    }
}

/// One statement in a structured ISCAS-89-style gate netlist description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GateStatement {
    /// `INPUT(<name>)`.
    Input {
        /// The primary input's name.
        name: String,
    },
    /// `OUTPUT(<name>)`, referencing a previously declared signal.
    Output {
        /// The signal being declared a primary output.
        name: String,
    },
    /// `<output> = <gate_type>(<inputs...>)`.
    Gate {
        /// The signal this gate drives.
        output: String,
        /// Gate type, e.g. `"NAND"`.
        gate_type: String,
        /// Driver signal names, order preserved.
        inputs: Vec<String>,
    },
    /// `<output> = DFF(<input>)`; splits into a pseudo-input node
    /// (`output`, the flop's `Q`) and a pseudo-output marker on `input`
    /// (the flop's `D`), with no edge between them.
    Dff {
        /// The flop's `Q` output, becomes a fresh primary-input-like node.
        output: String,
        /// The flop's `D` input: an existing signal, marked as a sink.
        input: String,
    },
}

/// A complete structured netlist description, as it would be deserialized
/// from JSON at the external boundary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateNetlistInput {
    /// Statements, in any order; signal references are resolved by name
    /// regardless of declaration order.
    pub statements: Vec<GateStatement>,
}
