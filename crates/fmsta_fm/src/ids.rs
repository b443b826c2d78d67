//! Opaque ID newtypes for FM netlist entities.

use fmsta_common::ArenaId;
use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                $name::from_raw(index)
            }
            fn as_raw(self) -> u32 {
                $name::as_raw(self)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a cell in the FM netlist.
    CellId
);

define_id!(
    /// Opaque, copyable ID for a net in the FM netlist.
    NetId
);

define_id!(
    /// Opaque, copyable ID for a node in a [`crate::bucket::GainBucket`] bank.
    BucketNodeId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_id_roundtrip() {
        let id = CellId::from_raw(12);
        assert_eq!(id.as_raw(), 12);
    }

    #[test]
    fn net_id_roundtrip() {
        let id = NetId::from_raw(7);
        assert_eq!(id.as_raw(), 7);
    }

    #[test]
    fn ids_distinct_types_same_raw_not_comparable_by_design() {
        let c = CellId::from_raw(1);
        let n = NetId::from_raw(1);
        assert_eq!(c.as_raw(), n.as_raw());
    }

    #[test]
    fn serde_roundtrip() {
        let id = CellId::from_raw(99);
        let json = serde_json::to_string(&id).unwrap();
        let back: CellId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
