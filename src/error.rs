//! Error types for the teatime process surface.
//!
//! The timer core itself never fails: out-of-range adjustments clamp, repeated
//! starts and stops are no-ops. Errors only arise while reading configuration,
//! preparing the log directory, or running the terminal program.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between `main` and the first rendered frame.
#[derive(Debug, Error)]
pub enum Error {
    /// A duration argument could not be parsed.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration {
        /// The text as given.
        input: String,
        /// Why it was rejected.
        reason: String,
    },

    /// The log directory could not be created.
    #[error("failed to create directory: {}", path.display())]
    DirectoryCreation {
        /// Directory that was being created.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// No log directory was given and `HOME` is not set.
    #[error("HOME environment variable not set; pass --log-dir")]
    HomeNotSet,

    /// The terminal program failed to start or crashed while running.
    #[error("terminal program error: {0}")]
    Program(#[from] bubbletea_rs::Error),
}

impl Error {
    pub(crate) fn invalid_duration(input: &str, reason: impl Into<String>) -> Self {
        Error::InvalidDuration {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}
