//! Top-level error enum composing every core crate's error type at the
//! CLI boundary, per the corpus's own per-crate-error split.

/// Every way a CLI invocation can fail.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Reading or writing an input/output file failed.
    #[error("I/O error on '{path}': {source}")]
    Io {
        /// The path being read or written.
        path: String,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The input file was not valid JSON for the expected shape.
    #[error("failed to parse '{path}' as JSON: {source}")]
    Json {
        /// The path being parsed.
        path: String,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// Loading the optional TOML config file failed.
    #[error(transparent)]
    Config(#[from] fmsta_config::ConfigError),

    /// The FM partitioner reported a fatal condition.
    #[error(transparent)]
    Fm(#[from] fmsta_fm::FmError),

    /// The cell library failed validation.
    #[error(transparent)]
    Library(#[from] fmsta_library::LibraryError),

    /// The STA engine reported a fatal condition.
    #[error(transparent)]
    Sta(#[from] fmsta_sta::StaError),

    /// An invariant the engine promises to uphold was violated — a
    /// defect in the engine, not the input.
    #[error(transparent)]
    Internal(#[from] fmsta_common::InternalError),
}
