//! Byte-offset ranges within source files for tracking diagnostic locations.

use crate::file_id::FileId;
use serde::{Deserialize, Serialize};

/// A byte offset range within a source file.
///
/// The `start` is inclusive and `end` is exclusive. Core operations that
/// have no backing text (programmatically constructed netlists) use
/// [`Span::DUMMY`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Span {
    /// The source file this span belongs to.
    pub file: FileId,
    /// Byte offset of the start of the span (inclusive).
    pub start: u32,
    /// Byte offset of the end of the span (exclusive).
    pub end: u32,
}

impl Span {
    /// A dummy span used when no source location is available.
    pub const DUMMY: Span = Span {
        file: FileId::DUMMY,
        start: 0,
        end: 0,
    };

    /// Creates a new span in the given file with the given byte range.
    pub fn new(file: FileId, start: u32, end: u32) -> Self {
        Self { file, start, end }
    }

    /// Merges two spans in the same file, producing a span that covers both.
    ///
    /// # Panics
    ///
    /// Panics if the two spans are from different files.
    pub fn merge(self, other: Span) -> Span {
        assert_eq!(
            self.file, other.file,
            "cannot merge spans from different files"
        );
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the length of this span in bytes.
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    /// Returns `true` if this span has zero length.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns `true` if this is the dummy span.
    pub fn is_dummy(&self) -> bool {
        self.file == FileId::DUMMY
    }
}
