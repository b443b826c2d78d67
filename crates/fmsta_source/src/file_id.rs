//! Opaque identifier for a source file referenced by a diagnostic.

use serde::{Deserialize, Serialize};

/// Opaque identifier for a source file a caller-supplied text reader loaded
/// before handing structured data to the core.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct FileId(u32);

impl FileId {
    /// A dummy file ID used for synthetic spans (e.g. programmatically built
    /// netlists with no backing text).
    pub const DUMMY: FileId = FileId(u32::MAX);

    /// Creates a `FileId` from a raw `u32` value.
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw `u32` value of this `FileId`.
    pub fn as_raw(self) -> u32 {
        self.0
    }
}
