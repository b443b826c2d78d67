//! Non-fatal diagnostics accumulated during a partitioning or timing run.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use fmsta_source::Span;
use serde::{Deserialize, Serialize};

/// A single diagnostic: a severity, a stable code, a message, and an
/// optional source location.
///
/// Unlike the fatal `thiserror` enums each core exposes at its API
/// boundary, a `Diagnostic` never aborts a run by itself — it is pushed
/// onto a [`crate::sink::DiagnosticSink`] and surfaced to the caller
/// alongside the run's result.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// How severe this diagnostic is.
    pub severity: Severity,
    /// The stable diagnostic code.
    pub code: DiagnosticCode,
    /// A human-readable message.
    pub message: String,
    /// The source location this diagnostic pertains to, if any.
    pub span: Span,
    /// Additional notes attached to this diagnostic.
    pub notes: Vec<String>,
}

impl Diagnostic {
    /// Creates a new error-severity diagnostic with no span or notes.
    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code,
            message: message.into(),
            span: Span::DUMMY,
            notes: Vec::new(),
        }
    }

    /// Creates a new warning-severity diagnostic with no span or notes.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code,
            message: message.into(),
            span: Span::DUMMY,
            notes: Vec::new(),
        }
    }

    /// Creates a new note-severity diagnostic with no span or notes.
    pub fn note(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Note,
            code,
            message: message.into(),
            span: Span::DUMMY,
            notes: Vec::new(),
        }
    }

    /// Attaches a source location to this diagnostic.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }

    /// Appends a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}
