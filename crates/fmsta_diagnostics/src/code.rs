//! Diagnostic codes with category prefixes for structured error identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Netlist/library input problems, prefixed with `P` (parse-adjacent).
    Parse,
    /// FM partitioning diagnostics, prefixed with `F`.
    Partition,
    /// STA diagnostics, prefixed with `T` (timing).
    Timing,
    /// Cell library diagnostics, prefixed with `L`.
    Library,
    /// Internal engine bugs, prefixed with `I`.
    Internal,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Parse => 'P',
            Category::Partition => 'F',
            Category::Timing => 'T',
            Category::Library => 'L',
            Category::Internal => 'I',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a numeric
/// identifier.
///
/// Displayed as the category prefix followed by a zero-padded 3-digit
/// number, e.g. `F010`, `T004`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_prefixes() {
        assert_eq!(Category::Parse.prefix(), 'P');
        assert_eq!(Category::Partition.prefix(), 'F');
        assert_eq!(Category::Timing.prefix(), 'T');
        assert_eq!(Category::Library.prefix(), 'L');
        assert_eq!(Category::Internal.prefix(), 'I');
    }

    #[test]
    fn display_format() {
        let code = DiagnosticCode::new(Category::Partition, 1);
        assert_eq!(format!("{code}"), "F001");

        let code = DiagnosticCode::new(Category::Timing, 42);
        assert_eq!(format!("{code}"), "T042");
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Library, 101);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
