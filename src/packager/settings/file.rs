//! On-disk configuration file.
//!
//! Every key is optional; present keys override the platform defaults.
//!
//! ```toml
//! module = "Enginio"
//! variant = "online"
//! build_spec = "linux-g++"
//!
//! [tools]
//! make = "make"
//! runpath_tool = "patchelf"
//!
//! [[packages]]
//! id = "com.digia.enginio"
//! paths = ["include", "lib", "qml"]
//! ```

use super::{PackageDescriptor, Platform, PlatformFixup, RunPathTool, Variant};
use crate::packager::error::ErrorExt;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// File looked up under the distribution directory when no configuration
/// path is given.
pub const DEFAULT_CONFIG_FILE: &str = "packager.toml";

/// Deserialized configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Module name.
    #[serde(default)]
    pub module: Option<String>,

    /// Installer artifact prefix.
    #[serde(default)]
    pub installer_prefix: Option<String>,

    /// Package receiving headers and the module descriptor.
    #[serde(default)]
    pub main_package: Option<String>,

    /// Platform override.
    #[serde(default)]
    pub platform: Option<Platform>,

    /// Release variant.
    #[serde(default)]
    pub variant: Option<Variant>,

    /// Build spec for online installer names.
    #[serde(default)]
    pub build_spec: Option<String>,

    /// Wrap the installer in a disk image.
    #[serde(default)]
    pub disk_image: Option<bool>,

    /// Distribution directory, relative to the source root.
    #[serde(default)]
    pub dist_dir: Option<PathBuf>,

    /// Build configuration file, relative to the source root.
    #[serde(default)]
    pub build_config_file: Option<PathBuf>,

    /// Version marker key.
    #[serde(default)]
    pub version_marker: Option<String>,

    /// Installer generator configuration, relative to the distribution directory.
    #[serde(default)]
    pub installer_config: Option<PathBuf>,

    /// Header root, relative to the source root.
    #[serde(default)]
    pub header_root: Option<PathBuf>,

    /// Header glob, relative to the header root.
    #[serde(default)]
    pub header_pattern: Option<String>,

    /// Private header suffix.
    #[serde(default)]
    pub private_header_suffix: Option<String>,

    /// Post-build fixup override.
    #[serde(default)]
    pub fixup: Option<PlatformFixup>,

    /// Tool overrides.
    #[serde(default)]
    pub tools: ToolOverrides,

    /// Package table override.
    #[serde(default)]
    pub packages: Option<Vec<PackageDescriptor>>,
}

/// `[tools]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolOverrides {
    #[serde(default)]
    pub git: Option<String>,
    #[serde(default)]
    pub qmake: Option<String>,
    #[serde(default)]
    pub make: Option<String>,
    #[serde(default)]
    pub docs_make: Option<String>,
    #[serde(default)]
    pub binarycreator: Option<String>,
    #[serde(default)]
    pub runpath_tool: Option<RunPathTool>,
    /// Executable for `runpath_tool` when not on `PATH` under its usual name.
    #[serde(default)]
    pub runpath_program: Option<String>,
    #[serde(default)]
    pub disk_image_tool: Option<String>,
}

impl ConfigFile {
    /// Parses configuration from TOML text.
    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reads and parses a configuration file.
    pub fn load(path: &Path) -> crate::Result<Self> {
        let text = std::fs::read_to_string(path).fs_context("reading configuration", path)?;
        Ok(Self::parse(&text)?)
    }

    /// Loads `path` if it exists.
    pub fn load_optional(path: &Path) -> crate::Result<Option<Self>> {
        if path.is_file() {
            log::info!("Using configuration {}", path.display());
            Self::load(path).map(Some)
        } else {
            log::debug!("No configuration at {}, using defaults", path.display());
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_file() {
        let config = ConfigFile::parse(
            r#"
            module = "Enginio"
            platform = "linux"
            variant = "online"
            build_spec = "linux-g++"

            [tools]
            make = "gmake"
            runpath_tool = "patchelf"

            [fixup]
            kind = "relocate-libraries"
            from = "lib"
            to = "bin"
            pattern = "*.so"

            [[packages]]
            id = "com.digia.enginio"
            paths = ["include", "lib"]
            "#,
        )
        .unwrap();

        assert_eq!(config.platform, Some(Platform::Linux));
        assert_eq!(config.variant, Some(Variant::Online));
        assert_eq!(config.tools.make.as_deref(), Some("gmake"));
        assert_eq!(config.tools.runpath_tool, Some(RunPathTool::Patchelf));
        assert!(matches!(
            config.fixup,
            Some(PlatformFixup::RelocateLibraries { .. })
        ));
        let packages = config.packages.unwrap();
        assert_eq!(packages[0].paths, vec![PathBuf::from("include"), "lib".into()]);
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let config = ConfigFile::parse("").unwrap();
        assert!(config.module.is_none());
        assert!(config.packages.is_none());
        assert!(config.tools.git.is_none());
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(ConfigFile::parse("modul = \"typo\"").is_err());
    }

    #[test]
    fn missing_optional_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = ConfigFile::load_optional(&dir.path().join(DEFAULT_CONFIG_FILE)).unwrap();
        assert!(loaded.is_none());
    }
}
