//! Ordered severity levels for diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The severity of a diagnostic, ordered from least to most severe.
///
/// The derived `Ord` makes `Severity::Help < Severity::Note <
/// Severity::Warning < Severity::Error`, so a sink can find the worst
/// severity seen with a plain `max()` over its diagnostics.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// A suggestion with no bearing on correctness.
    Help,
    /// An informational notice.
    Note,
    /// A non-fatal condition worth the caller's attention.
    Warning,
    /// A fatal condition; the run cannot produce a trustworthy result.
    Error,
}

impl Severity {
    /// Returns `true` if this severity represents a fatal condition.
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Help => "help",
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        write!(f, "{s}")
    }
}
