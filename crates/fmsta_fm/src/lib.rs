//! Fiduccia–Mattheyses two-way min-cut hypergraph partitioner.
//!
//! A classical iterated local-search algorithm whose correctness hinges
//! on a constant-time "pick best feasible move" operation
//! ([`bucket::GainBucket`]) and exact incremental maintenance of derived
//! state (cut size, partition sizes, per-cell gains) by [`engine::FmEngine`].

#![warn(missing_docs)]

pub mod balance;
pub mod bucket;
pub mod engine;
pub mod error;
pub mod format;
pub mod ids;
pub mod netlist;

pub use balance::BalanceModel;
pub use bucket::GainBucket;
pub use engine::{FmEngine, PassReport, RunReport};
pub use error::FmError;
pub use format::format_output;
pub use ids::{BucketNodeId, CellId, NetId};
pub use netlist::{Cell, Net, NetInput, Netlist, PartitionInput};
