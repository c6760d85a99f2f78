//! macOS DMG disk image creator.
//!
//! Wraps the installer `.app` bundle produced by the installer generator in
//! a compressed disk image using the native hdiutil tool.

use crate::packager::{
    error::{Error, Result},
    process::{ToolCommand, run_checked},
    utils::fs::entry_exists,
};
use std::path::{Path, PathBuf};

/// Disk image file name for an installer: `{installer base name}.dmg`.
///
/// # Examples
///
/// ```
/// use release_packager::packager::platform::macos::dmg::disk_image_name;
///
/// assert_eq!(disk_image_name("EnginioInstaller_1.0.0"), "EnginioInstaller_1.0.0.dmg");
/// ```
pub fn disk_image_name(installer_name: &str) -> String {
    format!("{installer_name}.dmg")
}

/// Creates `{installer_name}.dmg` next to the installer bundle.
///
/// # DMG Creation Steps
/// 1. Verify the installer bundle exists
/// 2. Run `hdiutil create -volname <name> -srcfolder <bundle> -ov -format UDZO <dmg>`
/// 3. Verify the image was written
///
/// # Returns
/// PathBuf to created DMG file
pub async fn create_disk_image(
    tool: &str,
    installer_bundle: &Path,
    installer_name: &str,
) -> Result<PathBuf> {
    if !entry_exists(installer_bundle) {
        return Err(Error::ArtifactMissing {
            path: installer_bundle.to_path_buf(),
        });
    }

    let output_dir = installer_bundle.parent().unwrap_or_else(|| Path::new("."));
    let dmg_path = output_dir.join(disk_image_name(installer_name));

    log::info!("Creating disk image {}...", dmg_path.display());

    run_checked(
        &ToolCommand::new(tool)
            .args(["create", "-volname", installer_name, "-srcfolder"])
            .arg(installer_bundle)
            .args(["-ov", "-format", "UDZO"])
            .arg(&dmg_path)
            .current_dir(output_dir),
    )
    .await?;

    if !entry_exists(&dmg_path) {
        return Err(Error::ArtifactMissing { path: dmg_path });
    }

    log::info!("✓ Created DMG: {}", dmg_path.display());
    Ok(dmg_path)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    /// Writes an hdiutil stand-in that creates its last argument.
    fn fake_hdiutil(dir: &Path) -> PathBuf {
        let script = dir.join("fake-hdiutil");
        std::fs::write(&script, "#!/bin/sh\nfor last; do :; done\necho image > \"$last\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script
    }

    #[tokio::test]
    async fn requires_installer_bundle() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = fake_hdiutil(tmp.path());
        let bundle = tmp.path().join("EnginioInstaller_1.0.0.app");

        let err = create_disk_image(tool.to_str().unwrap(), &bundle, "EnginioInstaller_1.0.0")
            .await
            .unwrap_err();

        assert!(matches!(err, Error::ArtifactMissing { .. }));
        assert!(!tmp.path().join("EnginioInstaller_1.0.0.dmg").exists());
    }

    #[tokio::test]
    async fn image_is_named_after_installer() {
        let tmp = tempfile::tempdir().unwrap();
        let tool = fake_hdiutil(tmp.path());
        let bundle = tmp.path().join("EnginioInstaller_1.0.0.app");
        std::fs::create_dir_all(bundle.join("Contents")).unwrap();

        let dmg = create_disk_image(tool.to_str().unwrap(), &bundle, "EnginioInstaller_1.0.0")
            .await
            .unwrap();

        assert_eq!(dmg, tmp.path().join("EnginioInstaller_1.0.0.dmg"));
        assert!(dmg.is_file());
    }
}
