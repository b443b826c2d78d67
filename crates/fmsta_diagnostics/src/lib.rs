//! Structured diagnostics shared by both cores.
//!
//! Fatal conditions (`InvalidBalanceFactor`, `CycleDetected`,
//! `TableMalformed`, `UnknownGateType`, `InputMalformed`) are returned as
//! typed `Result` errors from each crate's own `thiserror` enum — they are
//! never represented as [`Diagnostic`]s. This crate covers the non-fatal
//! half: warnings (`DanglingReference`) and informational notices that
//! accumulate in a [`DiagnosticSink`] without aborting a run.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use severity::Severity;
pub use sink::DiagnosticSink;
