//! Installer generation.

use crate::packager::{
    error::{Error, Result},
    process::{ToolCommand, run_checked},
    settings::{Settings, Variant},
    utils::fs::entry_exists,
};
use std::path::PathBuf;

/// Installer base name: `{prefix}_{version}`, plus `_{spec}` for online
/// installers.
///
/// # Examples
///
/// ```
/// use release_packager::packager::phases::installer::artifact_name;
///
/// assert_eq!(artifact_name("EnginioInstaller", "1.2.3", None), "EnginioInstaller_1.2.3");
/// assert_eq!(
///     artifact_name("EnginioInstaller", "1.2.3", Some("linux-g++")),
///     "EnginioInstaller_1.2.3_linux-g++"
/// );
/// ```
pub fn artifact_name(prefix: &str, version: &str, build_spec: Option<&str>) -> String {
    match build_spec {
        Some(spec) => format!("{prefix}_{version}_{}", spec.replace(['/', '\\'], "-")),
        None => format!("{prefix}_{version}"),
    }
}

/// Runs the installer generator against the staging tree.
///
/// Executes `binarycreator [--offline-only] -c <config> -p <packages> <name>`
/// inside the distribution directory.
///
/// # Returns
///
/// Path of the produced installer (`<name>`, `<name>.exe` or `<name>.app`
/// depending on the platform).
pub async fn generate_installer(settings: &Settings, name: &str) -> Result<PathBuf> {
    let dist_dir = settings.dist_dir();
    let config = settings.installer_config();

    if !dist_dir.join(config).is_file() {
        return Err(Error::MissingSource {
            path: dist_dir.join(config),
        });
    }

    let packages = settings
        .staging_dir()
        .strip_prefix(dist_dir)
        .unwrap_or_else(|_| settings.staging_dir());

    let mut command = ToolCommand::new(&settings.tools().binarycreator);
    if settings.variant() == Variant::Offline {
        command = command.arg("--offline-only");
    }
    let command = command
        .arg("-c")
        .arg(config)
        .arg("-p")
        .arg(packages)
        .arg(name)
        .current_dir(dist_dir);

    log::info!("Generating installer {name}");
    run_checked(&command).await?;

    let installer = dist_dir.join(settings.platform().installer_file_name(name));
    if !entry_exists(&installer) {
        return Err(Error::ArtifactMissing { path: installer });
    }
    Ok(installer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_embedded_verbatim() {
        assert_eq!(artifact_name("EnginioInstaller", "1.2.3", None), "EnginioInstaller_1.2.3");
    }

    #[test]
    fn spec_separators_are_flattened() {
        assert_eq!(
            artifact_name("EnginioInstaller", "1.0", Some("unsupported/linux-clang")),
            "EnginioInstaller_1.0_unsupported-linux-clang"
        );
    }
}
