//! DLL relocation for Windows builds.
//!
//! qmake places built DLLs next to their import libraries in `lib/`, while
//! the installed layout expects them in `bin/`.

use crate::packager::{
    error::{ErrorExt, Result},
    utils::{fs::move_file, pattern::glob_in},
};
use std::path::{Path, PathBuf};

/// Moves the files matching `from/pattern` into `to`, both relative to
/// `build_dir`.
///
/// # Returns
///
/// The new locations of the moved files.
///
/// # Errors
///
/// Fails with [`Error::DestinationExists`](crate::packager::Error::DestinationExists)
/// if a file of the same name is already present in `to`.
pub async fn relocate_libraries(
    build_dir: &Path,
    from: &Path,
    to: &Path,
    pattern: &str,
) -> Result<Vec<PathBuf>> {
    let target_dir = build_dir.join(to);
    let mut moved = Vec::new();

    for library in glob_in(&build_dir.join(from), pattern)? {
        let metadata = tokio::fs::symlink_metadata(&library)
            .await
            .fs_context("inspecting", &library)?;
        if !metadata.is_file() {
            continue;
        }

        let Some(file_name) = library.file_name() else {
            continue;
        };
        let destination = target_dir.join(file_name);

        log::info!("Moving {} to {}", library.display(), destination.display());
        move_file(&library, &destination).await?;
        moved.push(destination);
    }

    Ok(moved)
}
