//! Core Settings struct and implementations.

use super::{PackageDescriptor, Platform, PlatformFixup, ToolSettings, Variant};
use std::path::{Path, PathBuf};

/// Main settings for a packaging run.
///
/// Holds every constant the pipeline needs: tool names, the package table,
/// the directory layout and the platform behavior. Constructed via
/// [`SettingsBuilder`](super::SettingsBuilder).
///
/// # Layout
///
/// ```text
/// <source_root>/
///   .qmake.conf                  version marker
///   src/*/*.h                    headers
///   dist/                        installer generator working directory
///     config/config.xml
///     build/                     build tree
///     packages/<id>/data/...     staging tree
/// ```
#[derive(Clone, Debug)]
pub struct Settings {
    pub(super) source_root: PathBuf,
    pub(super) dist_dir: PathBuf,
    pub(super) build_dir: PathBuf,
    pub(super) staging_dir: PathBuf,
    pub(super) installer_config: PathBuf,
    pub(super) build_config_file: PathBuf,
    pub(super) version_marker: String,
    pub(super) module: String,
    pub(super) main_package: String,
    pub(super) packages: Vec<PackageDescriptor>,
    pub(super) header_root: PathBuf,
    pub(super) header_pattern: String,
    pub(super) private_header_suffix: String,
    pub(super) installer_prefix: String,
    pub(super) tools: ToolSettings,
    pub(super) platform: Platform,
    pub(super) variant: Variant,
    pub(super) build_spec: Option<String>,
    pub(super) fixup: PlatformFixup,
    pub(super) disk_image: bool,
}

impl Settings {
    /// Root of the source checkout.
    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Directory the installer generator runs in.
    pub fn dist_dir(&self) -> &Path {
        &self.dist_dir
    }

    /// Build tree.
    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    /// Root of the staging tree.
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    /// Installer generator configuration, relative to [`Self::dist_dir`].
    pub fn installer_config(&self) -> &Path {
        &self.installer_config
    }

    /// File holding the version marker.
    pub fn build_config_file(&self) -> &Path {
        &self.build_config_file
    }

    /// Version marker key.
    pub fn version_marker(&self) -> &str {
        &self.version_marker
    }

    /// Module name, e.g. `Enginio`.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// Package receiving headers and the module descriptor.
    pub fn main_package(&self) -> &str {
        &self.main_package
    }

    /// Package table, in staging order.
    pub fn packages(&self) -> &[PackageDescriptor] {
        &self.packages
    }

    /// Directory the header pattern is matched in.
    pub fn header_root(&self) -> &Path {
        &self.header_root
    }

    /// Header glob, relative to [`Self::header_root`].
    pub fn header_pattern(&self) -> &str {
        &self.header_pattern
    }

    /// File name suffix marking a private header.
    pub fn private_header_suffix(&self) -> &str {
        &self.private_header_suffix
    }

    /// Installer artifact name prefix.
    pub fn installer_prefix(&self) -> &str {
        &self.installer_prefix
    }

    /// External tools.
    pub fn tools(&self) -> &ToolSettings {
        &self.tools
    }

    /// Packaging platform.
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Release variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Build spec, if configured.
    pub fn build_spec(&self) -> Option<&str> {
        self.build_spec.as_deref()
    }

    /// Post-build fixup.
    pub fn fixup(&self) -> &PlatformFixup {
        &self.fixup
    }

    /// Whether the installer is wrapped in a disk image.
    pub fn disk_image(&self) -> bool {
        self.disk_image
    }

    /// Data directory of a package inside the staging tree.
    pub fn package_data_dir(&self, package: &str) -> PathBuf {
        self.staging_dir.join(package).join("data")
    }

    /// Destination of public headers.
    pub fn public_header_dir(&self) -> PathBuf {
        self.package_data_dir(&self.main_package)
            .join("include")
            .join(&self.module)
    }

    /// Destination of private headers, qualified by the version.
    pub fn private_header_dir(&self, version: &str) -> PathBuf {
        self.public_header_dir()
            .join(version)
            .join(&self.module)
            .join("private")
    }

    /// File name of the module descriptor, e.g. `qt_lib_enginio.pri`.
    pub fn module_descriptor_name(&self) -> String {
        format!("qt_lib_{}.pri", self.module.to_lowercase())
    }

    /// Module descriptor produced by the build.
    pub fn module_descriptor_source(&self) -> PathBuf {
        self.build_dir
            .join("mkspecs")
            .join("modules-inst")
            .join(self.module_descriptor_name())
    }

    /// Module descriptor location inside the staging tree.
    pub fn module_descriptor_destination(&self) -> PathBuf {
        self.package_data_dir(&self.main_package)
            .join("mkspecs")
            .join("modules")
            .join(self.module_descriptor_name())
    }
}
