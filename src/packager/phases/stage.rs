//! Staging of package path groups.
//!
//! Every path of every package is resolved against the source tree first and
//! the build tree second, then copied to `<staging>/<id>/data/<path>`. The
//! staging tree is never merged into: an existing destination aborts the run.

use crate::cli::OutputManager;
use crate::packager::{
    error::{Error, Result},
    settings::{PackageDescriptor, Settings},
    utils::fs::{copy_dir, copy_file, ensure_absent},
};
use std::path::{Path, PathBuf};

/// Finds `path` in the source tree, falling back to the build tree.
///
/// # Errors
///
/// [`Error::MissingSource`] if it exists in neither.
pub fn resolve_source(source_root: &Path, build_dir: &Path, path: &Path) -> Result<PathBuf> {
    [source_root, build_dir]
        .into_iter()
        .map(|root| root.join(path))
        .find(|candidate| candidate.exists())
        .ok_or_else(|| Error::MissingSource {
            path: path.to_path_buf(),
        })
}

/// Copies one resolved source into its staging destination.
///
/// Files get their parent directories created; directories are copied
/// recursively.
pub async fn stage_path(source: &Path, destination: &Path) -> Result<()> {
    ensure_absent(destination)?;

    if source.is_file() {
        copy_file(source, destination).await
    } else {
        copy_dir(source, destination).await
    }
}

/// Stages one package.
pub async fn stage_package(
    settings: &Settings,
    package: &PackageDescriptor,
    output: &OutputManager,
) -> Result<Vec<PathBuf>> {
    let data_dir = settings.package_data_dir(&package.id);
    let mut staged = Vec::with_capacity(package.paths.len());

    for path in &package.paths {
        let source = resolve_source(settings.source_root(), settings.build_dir(), path)?;
        output.progress(&format!("Creating {} dir.", path.display()))?;

        let destination = data_dir.join(path);
        output.verbose(&format!("  {} -> {}", source.display(), destination.display()))?;
        stage_path(&source, &destination).await?;
        staged.push(destination);
    }

    Ok(staged)
}

/// Stages every package of the table, in order.
///
/// # Returns
///
/// The staged destinations.
pub async fn stage_packages(settings: &Settings, output: &OutputManager) -> Result<Vec<PathBuf>> {
    let mut staged = Vec::new();
    for package in settings.packages() {
        log::info!("Staging {}", package.id);
        staged.extend(stage_package(settings, package, output).await?);
    }
    Ok(staged)
}
