//! Builder for constructing Settings.

use super::{
    ConfigFile, PackageDescriptor, Platform, Settings, ToolSettings, Variant,
};
use crate::packager::error::{Context, ErrorExt, Result};
use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

/// Builder for constructing [`Settings`].
///
/// Values are layered: platform defaults first, then the configuration
/// file, then explicit overrides set on the builder.
///
/// # Examples
///
/// ```no_run
/// use release_packager::packager::{Platform, SettingsBuilder, Variant};
///
/// # fn example() -> release_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new(".")
///     .platform(Platform::Linux)
///     .variant(Variant::Online)
///     .build_spec("linux-g++")
///     .build()?;
/// assert_eq!(settings.tools().make, "make");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct SettingsBuilder {
    source_root: PathBuf,
    config: ConfigFile,
    platform: Option<Platform>,
    variant: Option<Variant>,
    build_spec: Option<String>,
}

impl SettingsBuilder {
    /// Creates a builder for the checkout at `source_root`.
    pub fn new<P: AsRef<Path>>(source_root: P) -> Self {
        Self {
            source_root: source_root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Layers a configuration file over the platform defaults.
    pub fn config_file(mut self, config: ConfigFile) -> Self {
        self.config = config;
        self
    }

    /// Overrides the packaging platform.
    ///
    /// Default: the configured platform, else the host
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    /// Overrides the release variant.
    pub fn variant(mut self, variant: Variant) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Overrides the build spec used in online installer names.
    pub fn build_spec(mut self, spec: impl Into<String>) -> Self {
        self.build_spec = Some(spec.into());
        self
    }

    /// Builds the settings.
    ///
    /// # Errors
    ///
    /// Fails when the source root cannot be made absolute or the
    /// configuration names an empty package table.
    pub fn build(self) -> Result<Settings> {
        let SettingsBuilder {
            source_root,
            config,
            platform,
            variant,
            build_spec,
        } = self;

        let source_root = source_root
            .absolutize()
            .fs_context("resolving source root", &source_root)?
            .into_owned();

        let platform = platform.or(config.platform).unwrap_or_else(Platform::host);
        let module = config.module.unwrap_or_else(|| "Enginio".to_string());

        let dist_dir = source_root.join(config.dist_dir.unwrap_or_else(|| "dist".into()));
        let build_dir = dist_dir.join("build");
        let staging_dir = dist_dir.join("packages");

        let packages = config
            .packages
            .unwrap_or_else(|| PackageDescriptor::default_table(platform));
        if packages.is_empty() {
            crate::bail!("package table is empty");
        }
        let main_package = match config.main_package {
            Some(id) => id,
            None => packages
                .first()
                .map(|p| p.id.clone())
                .context("package table is empty")?,
        };

        let mut tools = ToolSettings::for_platform(platform);
        let overrides = config.tools;
        if let Some(git) = overrides.git {
            tools.git = git;
        }
        if let Some(qmake) = overrides.qmake {
            tools.qmake = qmake;
        }
        if let Some(make) = overrides.make {
            tools.make = make;
        }
        if let Some(docs_make) = overrides.docs_make {
            tools.docs_make = docs_make;
        }
        if let Some(binarycreator) = overrides.binarycreator {
            tools.binarycreator = binarycreator;
        }
        if let Some(runpath_tool) = overrides.runpath_tool {
            tools.runpath_tool = runpath_tool;
        }
        if overrides.runpath_program.is_some() {
            tools.runpath_program = overrides.runpath_program;
        }
        if let Some(disk_image_tool) = overrides.disk_image_tool {
            tools.disk_image_tool = disk_image_tool;
        }

        let settings = Settings {
            build_config_file: source_root
                .join(config.build_config_file.unwrap_or_else(|| ".qmake.conf".into())),
            header_root: source_root.join(config.header_root.unwrap_or_else(|| "src".into())),
            installer_config: config
                .installer_config
                .unwrap_or_else(|| Path::new("config").join("config.xml")),
            version_marker: config
                .version_marker
                .unwrap_or_else(|| "MODULE_VERSION".to_string()),
            header_pattern: config.header_pattern.unwrap_or_else(|| "*/*.h".to_string()),
            private_header_suffix: config
                .private_header_suffix
                .unwrap_or_else(|| "_p.h".to_string()),
            installer_prefix: config
                .installer_prefix
                .unwrap_or_else(|| format!("{module}Installer")),
            variant: variant.or(config.variant).unwrap_or_default(),
            build_spec: build_spec.or(config.build_spec),
            fixup: config.fixup.unwrap_or_else(|| platform.default_fixup()),
            disk_image: config
                .disk_image
                .unwrap_or_else(|| platform.default_disk_image()),
            source_root,
            dist_dir,
            build_dir,
            staging_dir,
            module,
            main_package,
            packages,
            tools,
            platform,
        };

        log::debug!("Resolved settings: {settings:?}");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::PlatformFixup;

    #[test]
    fn defaults_reproduce_enginio_layout() {
        let settings = SettingsBuilder::new("/work/enginio")
            .platform(Platform::Linux)
            .build()
            .unwrap();

        assert_eq!(settings.dist_dir(), Path::new("/work/enginio/dist"));
        assert_eq!(settings.build_dir(), Path::new("/work/enginio/dist/build"));
        assert_eq!(settings.staging_dir(), Path::new("/work/enginio/dist/packages"));
        assert_eq!(settings.main_package(), "com.digia.enginio");
        assert_eq!(settings.installer_prefix(), "EnginioInstaller");
        assert_eq!(settings.variant(), Variant::Offline);
        assert!(!settings.disk_image());
        assert_eq!(
            settings.private_header_dir("1.0.0"),
            Path::new("/work/enginio/dist/packages/com.digia.enginio/data/include/Enginio/1.0.0/Enginio/private")
        );
        assert_eq!(
            settings.module_descriptor_source(),
            Path::new("/work/enginio/dist/build/mkspecs/modules-inst/qt_lib_enginio.pri")
        );
        assert_eq!(
            settings.module_descriptor_destination(),
            Path::new("/work/enginio/dist/packages/com.digia.enginio/data/mkspecs/modules/qt_lib_enginio.pri")
        );
    }

    #[test]
    fn windows_uses_jom_and_relocates_dlls() {
        let settings = SettingsBuilder::new("/work")
            .platform(Platform::Windows)
            .build()
            .unwrap();

        assert_eq!(settings.tools().make, "jom");
        assert_eq!(settings.tools().docs_make, "nmake");
        assert!(matches!(
            settings.fixup(),
            PlatformFixup::RelocateLibraries { .. }
        ));
    }

    #[test]
    fn explicit_overrides_beat_configuration() {
        let config = ConfigFile::parse(
            r#"
            platform = "macos"
            variant = "offline"
            build_spec = "macx-clang"
            disk_image = false

            [tools]
            binarycreator = "/opt/ifw/bin/binarycreator"
            "#,
        )
        .unwrap();

        let settings = SettingsBuilder::new("/work")
            .config_file(config)
            .variant(Variant::Online)
            .build_spec("macx-g++")
            .build()
            .unwrap();

        assert_eq!(settings.platform(), Platform::MacOs);
        assert_eq!(settings.variant(), Variant::Online);
        assert_eq!(settings.build_spec(), Some("macx-g++"));
        assert!(!settings.disk_image());
        assert_eq!(settings.tools().binarycreator, "/opt/ifw/bin/binarycreator");
    }

    #[test]
    fn empty_package_table_is_rejected() {
        let config = ConfigFile::parse("packages = []").unwrap();
        let err = SettingsBuilder::new("/work")
            .config_file(config)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("package table is empty"));
    }
}
