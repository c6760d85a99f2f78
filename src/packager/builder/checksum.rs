//! Artifact size and SHA-256 digest.
//!
//! Installers are single files on Linux and Windows but `.app` directory
//! bundles on macOS. A bundle digest covers every regular file in sorted
//! relative-path order, each contributing its path and then its bytes.

use crate::packager::{
    Result,
    error::{Error, ErrorExt},
};
use sha2::{Digest, Sha256};
use std::{
    fs::File,
    io,
    path::{Path, PathBuf},
};

/// Size and digest of one artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactDigest {
    /// Bytes, summed over regular files for bundles.
    pub size: u64,
    /// Hex-encoded SHA-256.
    pub sha256: String,
}

/// Computes size and digest of a file or bundle directory.
///
/// The walk runs on the blocking pool.
pub async fn digest_artifact(path: &Path) -> Result<ArtifactDigest> {
    let path = path.to_path_buf();
    tokio::task::spawn_blocking(move || digest_blocking(&path))
        .await
        .map_err(|e| Error::GenericError(format!("checksum task panicked: {e}")))?
}

fn digest_blocking(path: &Path) -> Result<ArtifactDigest> {
    let metadata = std::fs::metadata(path).fs_context("reading artifact metadata", path)?;
    let mut hasher = Sha256::new();

    let size = if metadata.is_file() {
        hash_contents(path, &mut hasher)?
    } else if metadata.is_dir() {
        let mut files = bundle_files(path)?;
        files.sort();

        let mut size = 0;
        for relative in files {
            hasher.update(relative.to_string_lossy().as_bytes());
            size += hash_contents(&path.join(&relative), &mut hasher)?;
        }
        size
    } else {
        crate::bail!("{} is neither a file nor a directory", path.display());
    };

    Ok(ArtifactDigest {
        size,
        sha256: format!("{:x}", hasher.finalize()),
    })
}

/// Regular files below `root`, relative to it. Symlinks are not followed.
fn bundle_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in walkdir::WalkDir::new(root).follow_links(false) {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.path().strip_prefix(root)?.to_path_buf());
        }
    }
    Ok(files)
}

fn hash_contents(path: &Path, hasher: &mut Sha256) -> Result<u64> {
    let mut file = File::open(path).fs_context("opening file for hashing", path)?;
    io::copy(&mut file, hasher).fs_context("hashing", path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn file_digest_matches_known_value() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("EnginioInstaller_1.0.0");
        std::fs::write(&file, "abc").unwrap();

        let digest = digest_artifact(&file).await.unwrap();
        assert_eq!(
            digest.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(digest.size, 3);
    }

    #[tokio::test]
    async fn bundle_digest_is_deterministic_and_content_sensitive() {
        let tmp = tempfile::tempdir().unwrap();
        let make_bundle = |name: &str, payload: &str| {
            let bundle = tmp.path().join(name);
            std::fs::create_dir_all(bundle.join("Contents/MacOS")).unwrap();
            std::fs::write(bundle.join("Contents/Info.plist"), "<plist/>").unwrap();
            std::fs::write(bundle.join("Contents/MacOS/installer"), payload).unwrap();
            bundle
        };

        let a = digest_artifact(&make_bundle("a.app", "v1")).await.unwrap();
        let b = digest_artifact(&make_bundle("b.app", "v1")).await.unwrap();
        let c = digest_artifact(&make_bundle("c.app", "v2")).await.unwrap();

        assert_eq!(a, b);
        assert_ne!(a.sha256, c.sha256);
        assert_eq!(a.size, 10);
    }

    #[tokio::test]
    async fn missing_artifact_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = digest_artifact(&tmp.path().join("absent")).await.unwrap_err();
        assert!(matches!(err, Error::Fs { .. }));
    }
}
