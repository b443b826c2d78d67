//! Opaque ID newtype for gate-DAG nodes.

use fmsta_common::ArenaId;
use serde::{Deserialize, Serialize};

/// Opaque, copyable ID for a node in the gate DAG.
///
/// Ids are assigned in construction order, which for an
/// [`crate::netlist::Netlist`] built from a [`crate::netlist::GateNetlistInput`]
/// coincides with first-mention order across the statement list.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct GateId(u32);

impl GateId {
    /// Creates an ID from a raw `u32` index.
    pub fn from_raw(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw `u32` index.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}

impl ArenaId for GateId {
    fn from_raw(index: u32) -> Self {
        GateId::from_raw(index)
    }
    fn as_raw(self) -> u32 {
        GateId::as_raw(self)
    }
}
