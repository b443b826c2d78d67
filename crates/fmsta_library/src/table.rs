//! 7×7 delay/slew lookup tables.

use crate::error::LibraryError;
use serde::{Deserialize, Serialize};

/// A 7×7 lookup table: rows indexed by input-slew breakpoints (ns),
/// columns by output-load breakpoints (fF), values in ns.
///
/// Both index vectors must be strictly increasing; validated at
/// construction, never re-checked by the interpolator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookupTable {
    /// Input-slew breakpoints, in ns, strictly increasing.
    pub index_1: [f64; 7],
    /// Output-load breakpoints, in fF, strictly increasing.
    pub index_2: [f64; 7],
    /// Table values, in ns: `values[row][col]` for `(index_1[row], index_2[col])`.
    pub values: [[f64; 7]; 7],
}

impl LookupTable {
    /// Validates that both index vectors are strictly increasing.
    ///
    /// `cell_type` is used only to label the error.
    pub fn validate(&self, cell_type: &str) -> Result<(), LibraryError> {
        if !is_strictly_increasing(&self.index_1) {
            return Err(LibraryError::TableMalformed {
                cell_type: cell_type.to_string(),
                reason: "index_1 (input-slew breakpoints) is not strictly increasing".to_string(),
            });
        }
        if !is_strictly_increasing(&self.index_2) {
            return Err(LibraryError::TableMalformed {
                cell_type: cell_type.to_string(),
                reason: "index_2 (load breakpoints) is not strictly increasing".to_string(),
            });
        }
        Ok(())
    }
}

fn is_strictly_increasing(values: &[f64; 7]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
