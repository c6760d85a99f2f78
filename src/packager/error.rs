//! Error types for packaging operations.
//!
//! Every failure in the pipeline is fatal. The variants distinguish the two
//! failure classes the process reports through its exit code: an external
//! tool that exited non-zero, and a violated filesystem precondition.

use std::{
    fmt::Display,
    io,
    path::{Path, PathBuf},
};
use thiserror::Error as DeriveError;

/// Result type alias for packaging operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building, staging or packaging a release.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// An external tool exited with a non-zero status.
    #[error("`{command}` failed with {}", describe_code(.code))]
    ToolFailed {
        /// Rendered command line
        command: String,
        /// Exit code, `None` when terminated by a signal
        code: Option<i32>,
    },

    /// An external tool could not be located on `PATH`.
    #[error("required tool `{tool}` not found: {reason}")]
    ToolNotFound {
        /// Tool name as configured
        tool: String,
        /// Lookup failure
        reason: String,
    },

    /// An external tool could not be spawned.
    #[error("failed to execute `{command}`: {error}")]
    CommandFailed {
        /// Rendered command line
        command: String,
        /// Spawn error
        #[source]
        error: io::Error,
    },

    /// A staged path exists in neither the source nor the build tree.
    #[error("Could not find path '{}' in source or build directory.", .path.display())]
    MissingSource {
        /// Path as listed in the package descriptor
        path: PathBuf,
    },

    /// A staging destination already exists.
    #[error("{} exists already.", .path.display())]
    DestinationExists {
        /// Offending destination path
        path: PathBuf,
    },

    /// No version marker was found in the build configuration file.
    #[error("no `{marker}` line with a version number in {}", .path.display())]
    VersionNotFound {
        /// Marker searched for
        marker: String,
        /// Build configuration file
        path: PathBuf,
    },

    /// The installer generator succeeded but its artifact is absent.
    #[error("expected artifact {} was not produced", .path.display())]
    ArtifactMissing {
        /// Expected artifact path
        path: PathBuf,
    },

    /// Invalid glob pattern in the configuration.
    #[error("invalid pattern `{pattern}`: {error}")]
    Pattern {
        /// Offending pattern
        pattern: String,
        /// Parser error
        #[source]
        error: glob::PatternError,
    },

    /// Filesystem error with the action and path that caused it.
    #[error("{context} {}: {error}", .path.display())]
    Fs {
        /// Action being performed
        context: String,
        /// Path involved
        path: PathBuf,
        /// Underlying error
        #[source]
        error: io::Error,
    },

    /// Plain I/O error.
    #[error("{0}")]
    IoError(#[from] io::Error),

    /// Directory walk error.
    #[error("{0}")]
    WalkDir(#[from] walkdir::Error),

    /// Path prefix error while mirroring a tree.
    #[error("{0}")]
    StripPrefix(#[from] std::path::StripPrefixError),

    /// Glob iteration error.
    #[error("{0}")]
    Glob(#[from] glob::GlobError),

    /// Anything else.
    #[error("{0}")]
    GenericError(String),
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl Error {
    /// Process exit status for this error.
    ///
    /// Tool failures propagate the tool's own exit code; everything else
    /// exits with 1.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}

/// Attaches the action and path to I/O results.
pub trait ErrorExt<T> {
    /// Wraps an I/O error in [`Error::Fs`].
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &str, path: impl AsRef<Path>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context: context.to_string(),
            path: path.as_ref().to_path_buf(),
            error,
        })
    }
}

/// anyhow-style context for results and options.
pub trait Context<T> {
    /// Adds a static message to the error.
    fn context<C: Display>(self, context: C) -> Result<T>;

    /// Adds a lazily built message to the error.
    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T>;
}

impl<T, E: Display> Context<T> for std::result::Result<T, E> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{context}: {e}")))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.map_err(|e| Error::GenericError(format!("{}: {e}", f())))
    }
}

impl<T> Context<T> for Option<T> {
    fn context<C: Display>(self, context: C) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(context.to_string()))
    }

    fn with_context<C: Display, F: FnOnce() -> C>(self, f: F) -> Result<T> {
        self.ok_or_else(|| Error::GenericError(f().to_string()))
    }
}

/// Returns early with a [`Error::GenericError`] built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::packager::Error::GenericError(format!($($arg)*)))
    };
}
