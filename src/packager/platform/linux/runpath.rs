//! Run path rewriting for ELF shared objects.
//!
//! Built libraries carry the absolute run path of the build machine. Before
//! staging, every shared object matched by a rule gets a relocatable run path
//! (`$ORIGIN`-relative) embedded with `chrpath` or `patchelf`.

use crate::packager::{
    error::{ErrorExt, Result},
    process::{ToolCommand, run_checked},
    settings::{RunPathRule, ToolSettings},
    utils::pattern::glob_in,
};
use std::path::{Path, PathBuf};

/// Rewrites the run path of the shared objects matched by `rules`.
///
/// Symlinks (e.g. `libEnginio.so -> libEnginio.so.1.0.0`) and files that are
/// not ELF shared objects are skipped.
///
/// # Returns
///
/// The patched files, in rule order.
pub async fn patch_runpath(
    build_dir: &Path,
    tools: &ToolSettings,
    rules: &[RunPathRule],
) -> Result<Vec<PathBuf>> {
    let mut patched = Vec::new();

    for rule in rules {
        for candidate in glob_in(build_dir, &rule.pattern)? {
            let metadata = tokio::fs::symlink_metadata(&candidate)
                .await
                .fs_context("inspecting", &candidate)?;
            if !metadata.is_file() {
                log::debug!("Skipping {} (not a regular file)", candidate.display());
                continue;
            }

            if !is_shared_object(&candidate).await? {
                log::debug!("Skipping {} (not an ELF shared object)", candidate.display());
                continue;
            }

            log::info!("Setting run path of {} to {}", candidate.display(), rule.rpath);
            run_checked(
                &ToolCommand::new(tools.runpath_program())
                    .args(tools.runpath_tool.args(&rule.rpath, &candidate)),
            )
            .await?;
            patched.push(candidate);
        }
    }

    Ok(patched)
}

/// Checks whether `path` is an ELF shared object, logging its current run path.
async fn is_shared_object(path: &Path) -> Result<bool> {
    let buffer = tokio::fs::read(path).await.fs_context("failed to read", path)?;

    match goblin::Object::parse(&buffer) {
        Ok(goblin::Object::Elf(elf)) => {
            if !elf.runpaths.is_empty() || !elf.rpaths.is_empty() {
                log::debug!(
                    "  current run path of {}: {:?} {:?}",
                    path.display(),
                    elf.rpaths,
                    elf.runpaths
                );
            }
            Ok(elf.is_lib)
        }
        Ok(_) => Ok(false),
        Err(e) => {
            log::debug!("  {} does not parse as an object file: {}", path.display(), e);
            Ok(false)
        }
    }
}
