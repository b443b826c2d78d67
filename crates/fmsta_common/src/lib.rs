//! Shared foundational types used across the fmsta EDA toolkit.
//!
//! This crate provides the interned identifier type used for cell/net/gate
//! names, a dense ID-indexed arena for the netlist entities both cores share,
//! and the common result type for internal (bug, not user-input) errors.

#![warn(missing_docs)]

pub mod arena;
pub mod ident;
pub mod result;

pub use arena::{Arena, ArenaId};
pub use ident::{Ident, Interner};
pub use result::{FmstaResult, InternalError};
