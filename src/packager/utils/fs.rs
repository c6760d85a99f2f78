//! File system helpers for staging.
//!
//! Staging never merges into an existing tree: [`copy_dir`] and
//! [`move_file`] refuse a present destination, while [`copy_file`]
//! overwrites (headers are refreshed on every run).

use crate::packager::error::{Error, ErrorExt, Result};
use std::path::Path;
use tokio::fs;

/// Returns `true` if something (including a dangling symlink) exists at `path`.
pub fn entry_exists(path: &Path) -> bool {
    std::fs::symlink_metadata(path).is_ok()
}

/// Fails with [`Error::DestinationExists`] if `path` is already present.
pub fn ensure_absent(path: &Path) -> Result<()> {
    if entry_exists(path) {
        return Err(Error::DestinationExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

async fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent)
            .await
            .fs_context("creating directory", parent),
        None => Ok(()),
    }
}

/// Copies one regular file, creating the destination's parents.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.is_file() {
        crate::bail!("{} is not a file", from.display());
    }
    create_parent(to).await?;
    fs::copy(from, to).await.fs_context("copying to", to)?;
    Ok(())
}

/// Copies the tree at `from` to the new path `to`.
///
/// Symlinks are recreated with their original targets, so versioned library
/// links (`libX.so -> libX.so.1.0.0`) survive staging.
pub async fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    if !from.is_dir() {
        crate::bail!("{} is not a directory", from.display());
    }
    ensure_absent(to)?;
    create_parent(to).await?;

    let (from, to) = (from.to_path_buf(), to.to_path_buf());
    tokio::task::spawn_blocking(move || copy_tree(&from, &to))
        .await
        .map_err(|e| Error::GenericError(format!("directory copy task panicked: {e}")))?
}

fn copy_tree(from: &Path, to: &Path) -> Result<()> {
    for entry in walkdir::WalkDir::new(from) {
        let entry = entry?;
        let target = to.join(entry.path().strip_prefix(from)?);
        let kind = entry.file_type();

        if kind.is_symlink() {
            let link = std::fs::read_link(entry.path()).fs_context("reading symlink", entry.path())?;
            recreate_symlink(&link, &target, entry.path().is_dir())
                .fs_context("creating symlink", &target)?;
        } else if kind.is_dir() {
            std::fs::create_dir(&target).fs_context("creating directory", &target)?;
        } else {
            std::fs::copy(entry.path(), &target).fs_context("copying to", &target)?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn recreate_symlink(link: &Path, at: &Path, _is_dir: bool) -> std::io::Result<()> {
    std::os::unix::fs::symlink(link, at)
}

#[cfg(windows)]
fn recreate_symlink(link: &Path, at: &Path, is_dir: bool) -> std::io::Result<()> {
    if is_dir {
        std::os::windows::fs::symlink_dir(link, at)
    } else {
        std::os::windows::fs::symlink_file(link, at)
    }
}

/// Moves a file to `to`, creating its parents. Fails if `to` exists.
pub async fn move_file(from: &Path, to: &Path) -> Result<()> {
    ensure_absent(to)?;
    create_parent(to).await?;
    fs::rename(from, to).await.fs_context("moving to", to)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn copy_dir_mirrors_tree() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        std::fs::create_dir_all(src.join("a/b")).unwrap();
        std::fs::write(src.join("a/b/file.txt"), "payload").unwrap();
        std::fs::write(src.join("top.txt"), "top").unwrap();

        let dst = tmp.path().join("out/nested/src");
        copy_dir(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst.join("a/b/file.txt")).unwrap(), "payload");
        assert_eq!(std::fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
    }

    #[tokio::test]
    async fn copy_dir_refuses_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::create_dir_all(&dst).unwrap();

        let err = copy_dir(&src, &dst).await.unwrap_err();
        assert!(matches!(err, Error::DestinationExists { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn copy_dir_preserves_symlinks() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("lib");
        std::fs::create_dir_all(&src).unwrap();
        std::fs::write(src.join("libEnginio.so.1.0.0"), "elf").unwrap();
        std::os::unix::fs::symlink("libEnginio.so.1.0.0", src.join("libEnginio.so")).unwrap();

        let dst = tmp.path().join("staged/lib");
        copy_dir(&src, &dst).await.unwrap();

        let link = std::fs::read_link(dst.join("libEnginio.so")).unwrap();
        assert_eq!(link, Path::new("libEnginio.so.1.0.0"));
    }

    #[tokio::test]
    async fn copy_file_creates_parents_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.h");
        std::fs::write(&src, "new").unwrap();
        let dst = tmp.path().join("include/Enginio/a.h");

        copy_file(&src, &dst).await.unwrap();
        std::fs::write(&dst, "forwarding").unwrap();
        copy_file(&src, &dst).await.unwrap();

        assert_eq!(std::fs::read_to_string(dst).unwrap(), "new");
    }

    #[tokio::test]
    async fn move_file_refuses_existing_destination() {
        let tmp = tempfile::tempdir().unwrap();
        let src = tmp.path().join("a.dll");
        let dst = tmp.path().join("bin/a.dll");
        std::fs::write(&src, "x").unwrap();
        std::fs::create_dir_all(tmp.path().join("bin")).unwrap();
        std::fs::write(&dst, "old").unwrap();

        assert!(matches!(
            move_file(&src, &dst).await.unwrap_err(),
            Error::DestinationExists { .. }
        ));
        assert!(src.exists());
        assert_eq!(std::fs::read_to_string(dst).unwrap(), "old");
    }
}
