//! Release packager library for Qt modules
//!
//! This library builds a Qt module and turns its build output into a
//! Qt Installer Framework installer:
//! - staging of package path groups, headers and the module descriptor
//! - platform fixups (Linux run paths, Windows DLL placement)
//! - installer generation, plus a disk image on macOS
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod packager;

// Re-export commonly used types
pub use error::{CliError, PackagerError, Result};
