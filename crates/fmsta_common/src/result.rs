//! Common result and error types shared by both cores.

/// The standard result type for fallible internal operations.
///
/// `Err` indicates an unrecoverable internal error — a bug in the engine,
/// such as an invariant violation — not a user-facing input error. User
/// errors are reported through the crate-specific `thiserror` enums
/// (`fmsta_fm::FmError`, `fmsta_library::LibraryError`,
/// `fmsta_sta::StaError`).
pub type FmstaResult<T> = Result<T, InternalError>;

/// An internal engine error indicating a bug, not a user input problem.
///
/// These should never occur during normal operation. If one does occur, it
/// means an invariant (I1–I5, I7) has been violated by a logic error and
/// should be fixed, not worked around.
#[derive(Debug, thiserror::Error)]
#[error("internal error: {message}")]
pub struct InternalError {
    /// Description of the internal error.
    pub message: String,
}

impl InternalError {
    /// Creates a new internal error with the given message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<String> for InternalError {
    fn from(message: String) -> Self {
        Self { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_format() {
        let err = InternalError::new("gain bucket handle leaked");
        assert_eq!(format!("{err}"), "internal error: gain bucket handle leaked");
    }

    #[test]
    fn ok_path() {
        let r: FmstaResult<i32> = Ok(42);
        assert!(r.is_ok());
        assert_eq!(r.ok(), Some(42));
    }

    #[test]
    fn err_path() {
        let r: FmstaResult<i32> = Err(InternalError::new("test error"));
        assert!(r.is_err());
        assert_eq!(r.err().unwrap().message, "test error");
    }

    #[test]
    fn from_string() {
        let err: InternalError = "from string".to_string().into();
        assert_eq!(err.message, "from string");
    }
}
