//! Checked invocation of external tools.
//!
//! Every tool the pipeline runs goes through [`run_checked`] or
//! [`capture_checked`]: the program is resolved on `PATH` up front, the
//! child's stderr stays attached to the console, and a non-zero exit turns
//! into [`Error::ToolFailed`] carrying the tool's exit code.

use crate::packager::error::{Error, Result};
use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// A command line for an external tool.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    program: String,
    args: Vec<OsString>,
    current_dir: Option<PathBuf>,
    discard_stdout: bool,
}

impl ToolCommand {
    /// Starts a command for `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
            discard_stdout: false,
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Runs the tool inside `dir`.
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sends the tool's stdout to the null device.
    pub fn discard_stdout(mut self) -> Self {
        self.discard_stdout = true;
        self
    }

    /// Program name as configured.
    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self) -> Result<tokio::process::Command> {
        let resolved = resolve_tool(&self.program)?;
        log::debug!("Running {} ({})", self, resolved.display());

        let mut command = tokio::process::Command::new(resolved);
        command.args(&self.args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        Ok(command)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// Locates `program` on `PATH`.
///
/// # Errors
///
/// [`Error::ToolNotFound`] when the program is not installed.
pub fn resolve_tool(program: &str) -> Result<PathBuf> {
    match which::which(program) {
        Ok(path) => Ok(path),
        Err(e) => {
            log::debug!("{program} not found in PATH: {e}");
            Err(Error::ToolNotFound {
                tool: program.to_string(),
                reason: e.to_string(),
            })
        }
    }
}

/// Runs a tool to completion and fails on a non-zero exit.
pub async fn run_checked(command: &ToolCommand) -> Result<()> {
    let mut child = command.command()?;
    if command.discard_stdout {
        child.stdout(Stdio::null());
    }

    let status = child.status().await.map_err(|error| Error::CommandFailed {
        command: command.to_string(),
        error,
    })?;

    if !status.success() {
        return Err(Error::ToolFailed {
            command: command.to_string(),
            code: status.code(),
        });
    }

    Ok(())
}

/// Runs a tool to completion and returns its trimmed stdout.
///
/// Stderr is passed through to the console.
pub async fn capture_checked(command: &ToolCommand) -> Result<String> {
    let mut child = command.command()?;
    child.stderr(Stdio::inherit());

    let output = child.output().await.map_err(|error| Error::CommandFailed {
        command: command.to_string(),
        error,
    })?;

    if !output.status.success() {
        return Err(Error::ToolFailed {
            command: command.to_string(),
            code: output.status.code(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn success_passes() {
        run_checked(&ToolCommand::new("true")).await.unwrap();
    }

    #[tokio::test]
    async fn failure_carries_exit_code() {
        let err = run_checked(&ToolCommand::new("sh").args(["-c", "exit 3"]))
            .await
            .unwrap_err();

        match &err {
            Error::ToolFailed { command, code } => {
                assert_eq!(command, "sh -c exit 3");
                assert_eq!(*code, Some(3));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(err.exit_code(), 3);
    }

    #[tokio::test]
    async fn missing_tool_is_reported() {
        let err = run_checked(&ToolCommand::new("definitely-not-a-real-tool-5b1e"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::ToolNotFound { .. }));
        assert_eq!(err.exit_code(), 1);
    }

    #[tokio::test]
    async fn capture_returns_stdout_in_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker.txt"), "").unwrap();

        let listing = capture_checked(&ToolCommand::new("ls").current_dir(dir.path()))
            .await
            .unwrap();
        assert_eq!(listing, "marker.txt");
    }
}
