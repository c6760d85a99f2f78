//! Post-build platform fixups.

use crate::packager::{
    error::Result,
    platform::{linux::runpath::patch_runpath, windows::relocate::relocate_libraries},
    settings::{PlatformFixup, Settings},
};
use std::path::PathBuf;

/// Applies the configured fixup to the build tree.
///
/// # Returns
///
/// The files that were moved or patched.
pub async fn apply_fixup(settings: &Settings) -> Result<Vec<PathBuf>> {
    let build_dir = settings.build_dir();

    match settings.fixup() {
        PlatformFixup::None => {
            log::debug!("No post-build fixup for {}", settings.platform());
            Ok(Vec::new())
        }
        PlatformFixup::RelocateLibraries { from, to, pattern } => {
            relocate_libraries(build_dir, from, to, pattern).await
        }
        PlatformFixup::PatchRunPath { rules } => {
            patch_runpath(build_dir, settings.tools(), rules).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputManager;
    use crate::packager::{
        phases::stage::stage_packages,
        settings::{Platform, SettingsBuilder},
    };

    #[tokio::test]
    async fn relocated_dlls_reach_the_main_component() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        for dir in ["include/Enginio", "examples/todos", "src/enginio_client"] {
            std::fs::create_dir_all(root.join(dir)).unwrap();
        }
        let build = root.join("dist/build");
        std::fs::create_dir_all(build.join("lib")).unwrap();
        std::fs::create_dir_all(build.join("qml/Enginio")).unwrap();
        std::fs::write(build.join("lib/Enginio.dll"), "dll").unwrap();
        std::fs::write(build.join("lib/Enginio.lib"), "import").unwrap();

        let settings = SettingsBuilder::new(root)
            .platform(Platform::Windows)
            .build()
            .unwrap();

        let moved = apply_fixup(&settings).await.unwrap();
        assert_eq!(moved, vec![build.join("bin/Enginio.dll")]);

        stage_packages(&settings, &OutputManager::new(false, true))
            .await
            .unwrap();

        let data = settings.package_data_dir("com.digia.enginio");
        assert_eq!(std::fs::read_to_string(data.join("bin/Enginio.dll")).unwrap(), "dll");
        assert!(data.join("lib/Enginio.lib").is_file());
        assert!(!data.join("lib/Enginio.dll").exists());
    }
}
