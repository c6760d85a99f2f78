//! Colored console output for packaging progress.
//!
//! Progress lines are user-facing and go to stdout; warnings and errors go
//! to stderr. Diagnostic detail belongs in `log`, not here. Color is used
//! only when the stream is a terminal.

use cyrup_termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};
use std::io::{self, IsTerminal, Write};

/// Writes progress, success and warning lines to the console.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

fn color_choice(is_terminal: bool) -> ColorChoice {
    if is_terminal {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}

fn stdout() -> StandardStream {
    StandardStream::stdout(color_choice(io::stdout().is_terminal()))
}

fn stderr() -> StandardStream {
    StandardStream::stderr(color_choice(io::stderr().is_terminal()))
}

/// Writes `marker` in `spec`, then `message` uncolored.
fn marked_line(
    stream: &mut StandardStream,
    spec: &ColorSpec,
    marker: &str,
    message: &str,
) -> io::Result<()> {
    stream.set_color(spec)?;
    write!(stream, "{marker}")?;
    stream.reset()?;
    writeln!(stream, "{message}")?;
    stream.flush()
}

impl OutputManager {
    /// Creates an output manager.
    ///
    /// `verbose` enables [`verbose`](Self::verbose) lines; `quiet`
    /// suppresses everything except warnings and errors.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether verbose lines are printed.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Prints a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.is_verbose() {
            return Ok(());
        }
        let mut stream = stdout();
        stream.set_color(ColorSpec::new().set_dimmed(true))?;
        writeln!(stream, "{message}")?;
        stream.reset()?;
        stream.flush()
    }

    /// Prints a progress line.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = stdout();
        writeln!(stream, "{message}")?;
        stream.flush()
    }

    /// Prints a success line with a green check mark.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        marked_line(
            &mut stdout(),
            ColorSpec::new().set_fg(Some(Color::Green)).set_bold(true),
            "✓ ",
            message,
        )
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = stdout();
        writeln!(stream)?;
        stream.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
        writeln!(stream, "== {title} ==")?;
        stream.reset()?;
        stream.flush()
    }

    /// Prints an indented line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = stdout();
        writeln!(stream, "  {message}")?;
        stream.flush()
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        marked_line(
            &mut stderr(),
            ColorSpec::new().set_fg(Some(Color::Yellow)).set_bold(true),
            "WARNING: ",
            message,
        )
    }

    /// Prints an error to stderr.
    pub fn error(&self, message: &str) -> io::Result<()> {
        marked_line(
            &mut stderr(),
            ColorSpec::new().set_fg(Some(Color::Red)).set_bold(true),
            "ERROR: ",
            message,
        )
    }
}

impl Default for OutputManager {
    fn default() -> Self {
        Self::new(false, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_silences_verbose_lines() {
        assert!(OutputManager::new(true, false).is_verbose());
        assert!(!OutputManager::new(true, true).is_verbose());
        assert!(!OutputManager::default().is_verbose());
    }

    #[test]
    fn color_only_on_terminals() {
        assert_eq!(color_choice(false), ColorChoice::Never);
        assert_eq!(color_choice(true), ColorChoice::Auto);
    }
}
