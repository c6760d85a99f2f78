//! Release packaging pipeline.
//!
//! Builds a Qt module, stages its artifacts into Qt Installer Framework
//! package directories and generates the installer:
//!
//! ```text
//! clean -> configure & build -> platform fixup -> stage -> package
//! ```
//!
//! Every step is a blocking external tool call or file copy, and the first
//! failure ends the run.

pub mod builder;
pub mod error;
pub mod phases;
pub mod platform;
pub mod process;
pub mod settings;
pub mod utils;
pub mod version;

pub use builder::{Packager, PhaseSelection};
pub use error::{Error, Result};
pub use settings::{
    ConfigFile, PackageDescriptor, Platform, PlatformFixup, RunPathRule, RunPathTool, Settings,
    SettingsBuilder, ToolSettings, Variant,
};

use std::fmt;
use std::path::PathBuf;

/// Kind of artifact produced by a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Installer generator output.
    Installer,
    /// Disk image wrapping the installer (macOS).
    DiskImage,
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactKind::Installer => f.write_str("installer"),
            ArtifactKind::DiskImage => f.write_str("disk image"),
        }
    }
}

/// An artifact produced by a run.
#[derive(Debug, Clone)]
pub struct PackagedArtifact {
    /// What was produced.
    pub kind: ArtifactKind,
    /// Location, inside the distribution directory.
    pub path: PathBuf,
    /// Size in bytes (sum of files for bundles).
    pub size: u64,
    /// Hex SHA-256.
    pub checksum: String,
}
