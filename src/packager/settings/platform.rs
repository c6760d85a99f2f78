//! Target platform, release variant and post-build fixups.

use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;

/// Platform the release is packaged on.
///
/// Selects tool defaults, the post-build fixup and the installer artifact
/// layout. Detected from the host unless configured explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Linux: ELF run path patching, plain installer binary.
    Linux,
    /// macOS: `.app` installer bundle wrapped in a disk image.
    #[serde(alias = "darwin")]
    MacOs,
    /// Windows: DLL relocation, `.exe` installer.
    Windows,
    /// Any other host: no fixup, plain installer binary.
    Other,
}

impl Platform {
    /// Detects the host platform.
    pub fn host() -> Self {
        if cfg!(target_os = "linux") {
            Platform::Linux
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Other
        }
    }

    /// File name of the installer produced by the installer generator for
    /// the given base name.
    pub fn installer_file_name(self, base: &str) -> String {
        match self {
            Platform::Windows => format!("{base}.exe"),
            Platform::MacOs => format!("{base}.app"),
            Platform::Linux | Platform::Other => base.to_string(),
        }
    }

    /// Default post-build fixup.
    pub fn default_fixup(self) -> PlatformFixup {
        match self {
            Platform::Windows => PlatformFixup::RelocateLibraries {
                from: PathBuf::from("lib"),
                to: PathBuf::from("bin"),
                pattern: "*.dll".to_string(),
            },
            Platform::Linux => PlatformFixup::PatchRunPath {
                rules: vec![
                    RunPathRule {
                        pattern: "lib/*.so*".to_string(),
                        rpath: "$ORIGIN".to_string(),
                    },
                    RunPathRule {
                        pattern: "qml/*/*.so".to_string(),
                        rpath: "$ORIGIN/../../lib".to_string(),
                    },
                ],
            },
            Platform::MacOs | Platform::Other => PlatformFixup::None,
        }
    }

    /// Whether a disk image wraps the installer by default.
    pub fn default_disk_image(self) -> bool {
        self == Platform::MacOs
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
            Platform::Windows => "windows",
            Platform::Other => "other",
        };
        f.write_str(name)
    }
}

/// Release variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Self-contained installer, generated with `--offline-only`.
    #[default]
    Offline,
    /// Network installer; its name carries the build spec.
    Online,
}

/// Post-build fixup applied to the build tree before staging.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum PlatformFixup {
    /// Nothing to do.
    #[default]
    None,

    /// Move built libraries into the runtime directory.
    RelocateLibraries {
        /// Directory (relative to the build tree) holding the libraries
        from: PathBuf,
        /// Runtime directory (relative to the build tree)
        to: PathBuf,
        /// File name pattern inside `from`
        pattern: String,
    },

    /// Rewrite the run path embedded in built shared objects.
    PatchRunPath {
        /// Pattern to run path assignments, relative to the build tree
        rules: Vec<RunPathRule>,
    },
}

/// Run path assigned to shared objects matching a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunPathRule {
    /// Glob relative to the build tree
    pub pattern: String,
    /// Run path to embed
    pub rpath: String,
}

/// Tool used to rewrite ELF run paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunPathTool {
    /// `chrpath -r <rpath> <file>`
    #[default]
    Chrpath,
    /// `patchelf --set-rpath <rpath> <file>`
    Patchelf,
}

impl RunPathTool {
    /// Executable name.
    pub fn program(self) -> &'static str {
        match self {
            RunPathTool::Chrpath => "chrpath",
            RunPathTool::Patchelf => "patchelf",
        }
    }

    /// Arguments that set `rpath` on `file`.
    pub fn args(self, rpath: &str, file: &std::path::Path) -> Vec<std::ffi::OsString> {
        let flag = match self {
            RunPathTool::Chrpath => "-r",
            RunPathTool::Patchelf => "--set-rpath",
        };
        vec![flag.into(), rpath.into(), file.as_os_str().to_owned()]
    }
}
