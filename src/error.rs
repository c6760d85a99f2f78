//! Top-level error types.
//!
//! This module defines the error returned by the CLI and its mapping to the
//! process exit status.

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, PackagerError>;

/// Main error type for a packaging run
#[derive(Error, Debug)]
pub enum PackagerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Pipeline errors
    #[error("{0}")]
    Packager(#[from] crate::packager::Error),

    /// Errors with added context; the whole cause chain is shown
    #[error("{0:#}")]
    Anyhow(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Conflicting arguments
    #[error("Conflicting arguments: {arguments:?}")]
    ConflictingArguments {
        /// Arguments that conflict
        arguments: Vec<String>,
    },
}

impl PackagerError {
    /// Process exit status for this error.
    ///
    /// A failing external tool's exit code is propagated; every other
    /// failure exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            PackagerError::Packager(e) => e.exit_code(),
            _ => 1,
        }
    }
}
