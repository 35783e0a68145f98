//! CLI error types with associated exit codes.
//!
//! [`CliError`] is the top-level error type for the `jsonmatch` binary.
//! Every variant maps to a stable exit code via [`CliError::exit_code`]:
//!
//! - Exit code **2** — input failure: the tool could not access its input
//!   at all (missing directory, unreadable directory).
//! - Exit code **1** — logical failure: the tool ran but the engine
//!   reported a well-defined failure.
//!
//! Individually unreadable or malformed files are *not* errors: they are
//! skipped with a diagnostic and the run continues.

use std::fmt;
use std::path::PathBuf;

/// All error conditions the `jsonmatch` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// The given path does not exist or is not a directory.
    NotADirectory {
        /// The offending path.
        path: PathBuf,
    },

    /// The directory itself could not be enumerated.
    DirectoryRead {
        /// The directory that failed to enumerate.
        path: PathBuf,
        /// Underlying I/O detail.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The matching engine rejected its input.
    Engine {
        /// Engine error detail.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotADirectory { .. } | Self::DirectoryRead { .. } => 2,
            Self::Engine { .. } => 1,
        }
    }

    /// Returns the human-readable message printed to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::NotADirectory { path } => {
                format!("error: not a directory: {}", path.display())
            }
            Self::DirectoryRead { path, detail } => {
                format!("error: cannot read directory {}: {detail}", path.display())
            }
            Self::Engine { detail } => format!("error: matching failed: {detail}"),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}
