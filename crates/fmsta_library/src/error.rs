//! Error type for cell library loading and lookup-table validation.

/// Fatal conditions returned while constructing or validating a
/// [`crate::CellLibrary`].
#[derive(Debug, thiserror::Error)]
pub enum LibraryError {
    /// A lookup table's index vector was not strictly increasing, or the
    /// table wasn't 7×7.
    #[error("malformed lookup table for '{cell_type}': {reason}")]
    TableMalformed {
        /// The gate type whose table failed validation.
        cell_type: String,
        /// A human-readable description of the violation.
        reason: String,
    },
}
