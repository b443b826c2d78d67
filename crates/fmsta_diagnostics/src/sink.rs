//! Thread-safe accumulator for diagnostics emitted during a run.

use crate::diagnostic::Diagnostic;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Collects [`Diagnostic`]s emitted while a partitioning or timing run is
/// in progress.
///
/// Both cores run single-threaded passes internally, but the sink is kept
/// `Sync` so a caller driving several independent runs from a thread pool
/// (§5's per-run isolation) can still give each run its own sink without
/// extra synchronization at the call site.
#[derive(Debug, Default)]
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
}

impl DiagnosticSink {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a diagnostic, bumping the error counter if it is
    /// error-severity.
    pub fn emit(&self, diagnostic: Diagnostic) {
        if diagnostic.severity.is_error() {
            self.error_count.fetch_add(1, Ordering::SeqCst);
        }
        self.diagnostics
            .lock()
            .expect("diagnostic sink mutex poisoned")
            .push(diagnostic);
    }

    /// Returns `true` if any error-severity diagnostic has been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::SeqCst) > 0
    }

    /// Returns the number of error-severity diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::SeqCst)
    }

    /// Returns a snapshot of every diagnostic emitted so far, in emission
    /// order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics
            .lock()
            .expect("diagnostic sink mutex poisoned")
            .clone()
    }

    /// Drains and returns every diagnostic emitted so far, resetting the
    /// sink to empty but leaving the error counter untouched.
    pub fn take_all(&self) -> Vec<Diagnostic> {
        std::mem::take(
            &mut *self
                .diagnostics
                .lock()
                .expect("diagnostic sink mutex poisoned"),
        )
    }
}
