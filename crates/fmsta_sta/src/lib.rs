//! Block-based static timing analysis over a gate-level netlist: forward
//! (arrival/slew) and backward (required/slack) traversal plus
//! critical-path recovery, driven off a [`fmsta_library::CellLibrary`]
//! characterization.

#![warn(missing_docs)]

pub mod engine;
pub mod error;
pub mod format;
pub mod ids;
pub mod netlist;
pub mod topo;

pub use engine::{run, RunReport};
pub use error::StaError;
pub use ids::GateId;
pub use netlist::{GateKind, GateNetlistInput, GateNode, GateStatement, Netlist, TimingState};
pub use topo::TopologicalOrder;
