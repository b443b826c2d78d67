//! Error type for the FM partitioning engine.

/// Fatal conditions returned by the FM partitioner.
///
/// Invariant violations (I1–I5) are internal bugs and are reported via
/// [`fmsta_common::InternalError`] instead of this enum, since they
/// indicate a defect in the engine rather than a problem with caller
/// input.
#[derive(Debug, thiserror::Error)]
pub enum FmError {
    /// The balance factor supplied to [`crate::balance::BalanceModel::new`]
    /// was outside `[0.0, 1.0]`.
    #[error("invalid balance factor {0}: must lie in [0.0, 1.0]")]
    InvalidBalanceFactor(f64),

    /// [`crate::bucket::GainBucket::add`] was called on a cell that
    /// already has a bucket handle.
    #[error("cell {0:?} already has a gain bucket entry")]
    DuplicateInsert(crate::ids::CellId),

    /// The input netlist was malformed (e.g. a net referenced an unknown
    /// cell name).
    #[error("malformed partition input: {0}")]
    InputMalformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::CellId;

    #[test]
    fn display_invalid_balance_factor() {
        let err = FmError::InvalidBalanceFactor(1.5);
        assert_eq!(
            format!("{err}"),
            "invalid balance factor 1.5: must lie in [0.0, 1.0]"
        );
    }

    #[test]
    fn display_duplicate_insert() {
        let err = FmError::DuplicateInsert(CellId::from_raw(3));
        assert!(format!("{err}").contains("already has a gain bucket entry"));
    }

    #[test]
    fn display_input_malformed() {
        let err = FmError::InputMalformed("unknown cell 'x'".to_string());
        assert_eq!(format!("{err}"), "malformed partition input: unknown cell 'x'");
    }
}
