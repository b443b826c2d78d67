//! Minimal source-location types for diagnostics.
//!
//! ISCAS/Liberty text parsing is out of scope for this crate (see
//! `SPEC_FULL.md` §1.1): callers hand the core already-structured values. What
//! remains of the corpus's source-location machinery is the part diagnostics
//! still need — an opaque file identifier and a byte-range span — so a
//! caller-supplied text-layer reader can still attach locations to the
//! `InputMalformed` diagnostics it raises before handing data to the core.

#![warn(missing_docs)]

pub mod file_id;
pub mod span;

pub use file_id::FileId;
pub use span::Span;
