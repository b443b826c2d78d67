//! Cell library: per-gate-type input capacitance and delay/slew lookup
//! tables, with bilinear interpolation over the tables.
//!
//! A `CellLibrary` is read-only after construction, so callers may share
//! one across however many timing runs they like without locking.

#![warn(missing_docs)]

pub mod error;
pub mod interpolator;
pub mod table;

pub use error::LibraryError;
pub use table::LookupTable;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One gate type's timing characterization: the capacitance its input
/// pins present to a driver, and the two tables used to interpolate its
/// own delay and output slew.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellEntry {
    /// Input pin capacitance, in fF.
    pub capacitance_ff: f64,
    /// Cell-delay table: input slew × output load -> gate delay (ps).
    pub cell_delay: LookupTable,
    /// Output-slew table: input slew × output load -> output slew (ps).
    pub output_slew: LookupTable,
}

/// A complete cell library, deserializable directly from a JSON document
/// mapping uppercased gate-type name to [`CellEntry`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CellLibrary {
    entries: HashMap<String, CellEntry>,
}

impl CellLibrary {
    /// Builds a library from gate-type entries, validating every table.
    ///
    /// Gate-type names are upper-cased, matching the netlist's own
    /// gate-type normalization.
    pub fn new(entries: HashMap<String, CellEntry>) -> Result<Self, LibraryError> {
        let mut normalized = HashMap::with_capacity(entries.len());
        for (name, entry) in entries {
            let name = name.to_uppercase();
            entry.cell_delay.validate(&name)?;
            entry.output_slew.validate(&name)?;
            normalized.insert(name, entry);
        }
        Ok(CellLibrary {
            entries: normalized,
        })
    }

    /// Looks up a gate type's entry, or `None` if the library has no
    /// characterization for it. Callers that treat an unknown gate type
    /// as fatal surface their own error around this `None`.
    pub fn get(&self, gate_type: &str) -> Option<&CellEntry> {
        self.entries.get(&gate_type.to_uppercase())
    }

    /// Number of gate types characterized.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the library has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CellEntry {
    /// Interpolates this gate's delay, in ps, for the given input slew
    /// (ps) and output load (fF).
    pub fn delay_ps(&self, input_slew_ps: f64, load_ff: f64) -> f64 {
        interpolator::interpolate(&self.cell_delay, input_slew_ps, load_ff)
    }

    /// Interpolates this gate's output slew, in ps, for the given input
    /// slew (ps) and output load (fF).
    pub fn output_slew_ps(&self, input_slew_ps: f64, load_ff: f64) -> f64 {
        interpolator::interpolate(&self.output_slew, input_slew_ps, load_ff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_table(value: f64) -> LookupTable {
        LookupTable {
            index_1: [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7],
            index_2: [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0],
            values: [[value; 7]; 7],
        }
    }

    fn sample_library() -> CellLibrary {
        let mut entries = HashMap::new();
        entries.insert(
            "inv".to_string(),
            CellEntry {
                capacitance_ff: 1.0,
                cell_delay: flat_table(10.0),
                output_slew: flat_table(5.0),
            },
        );
        CellLibrary::new(entries).unwrap()
    }

    #[test]
    fn gate_type_names_are_upper_cased_on_insert_and_lookup() {
        let lib = sample_library();
        assert!(lib.get("INV").is_some());
        assert!(lib.get("inv").is_some());
        assert!(lib.get("Inv").is_some());
    }

    #[test]
    fn unknown_gate_type_returns_none() {
        let lib = sample_library();
        assert!(lib.get("NAND2").is_none());
    }

    #[test]
    fn malformed_table_rejected_at_construction() {
        let mut bad_table = flat_table(10.0);
        bad_table.index_1[3] = bad_table.index_1[2];
        let mut entries = HashMap::new();
        entries.insert(
            "INV".to_string(),
            CellEntry {
                capacitance_ff: 1.0,
                cell_delay: bad_table,
                output_slew: flat_table(5.0),
            },
        );
        assert!(CellLibrary::new(entries).is_err());
    }

    #[test]
    fn exact_breakpoint_round_trip() {
        let lib = sample_library();
        let inv = lib.get("INV").unwrap();
        // tau = 0.1ns = 100ps, load = 1.0fF is the table's first corner.
        assert!((inv.delay_ps(100.0, 1.0) - 10000.0).abs() < 1e-6);
        assert!((inv.output_slew_ps(100.0, 1.0) - 5000.0).abs() < 1e-6);
    }

    #[test]
    fn monotone_table_gives_monotone_lookup() {
        let mut entries = HashMap::new();
        let index_1 = [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7];
        let index_2 = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0];
        let mut values = [[0.0; 7]; 7];
        for (i, t) in index_1.iter().enumerate() {
            for (j, c) in index_2.iter().enumerate() {
                values[i][j] = t + c;
            }
        }
        entries.insert(
            "BUF".to_string(),
            CellEntry {
                capacitance_ff: 1.0,
                cell_delay: LookupTable {
                    index_1,
                    index_2,
                    values,
                },
                output_slew: flat_table(1.0),
            },
        );
        let lib = CellLibrary::new(entries).unwrap();
        let buf = lib.get("BUF").unwrap();
        let low = buf.delay_ps(200.0, 2.0);
        let high = buf.delay_ps(400.0, 6.0);
        assert!(high > low);
    }

    #[test]
    fn empty_library() {
        let lib = CellLibrary::new(HashMap::new()).unwrap();
        assert!(lib.is_empty());
        assert_eq!(lib.len(), 0);
        assert!(lib.get("INV").is_none());
    }
}
