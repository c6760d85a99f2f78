//! Public and private header staging.
//!
//! The build's `include/` tree only contains forwarding headers. The real
//! headers are copied over them from the source tree: private headers into
//! the version-qualified `private/` directory, all others into the module's
//! public include directory.

use crate::cli::OutputManager;
use crate::packager::{
    error::Result,
    settings::Settings,
    utils::{fs::copy_file, pattern::glob_in},
};
use std::path::{Path, PathBuf};

/// Header visibility, decided by file name suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderKind {
    /// Installed for users of the module.
    Public,
    /// Internal header, installed under the version-qualified private path.
    Private,
}

/// Classifies `header` by whether its file name ends with `private_suffix`.
pub fn classify_header(header: &Path, private_suffix: &str) -> HeaderKind {
    let is_private = header
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(private_suffix))
        .unwrap_or(false);

    if is_private {
        HeaderKind::Private
    } else {
        HeaderKind::Public
    }
}

/// Copies every header matched below the header root into the main package.
///
/// # Returns
///
/// The destinations written.
pub async fn copy_headers(
    settings: &Settings,
    version: &str,
    output: &OutputManager,
) -> Result<Vec<PathBuf>> {
    let public_dir = settings.public_header_dir();
    let private_dir = settings.private_header_dir(version);
    let mut copied = Vec::new();

    for header in glob_in(settings.header_root(), settings.header_pattern())? {
        if !header.is_file() {
            continue;
        }
        let Some(file_name) = header.file_name() else {
            continue;
        };

        let destination = match classify_header(&header, settings.private_header_suffix()) {
            HeaderKind::Private => private_dir.join(file_name),
            HeaderKind::Public => public_dir.join(file_name),
        };

        output.progress(&format!(
            "Copy {} to {}",
            header.display(),
            destination.display()
        ))?;
        copy_file(&header, &destination).await?;
        copied.push(destination);
    }

    if copied.is_empty() {
        log::warn!(
            "No headers matched {} below {}",
            settings.header_pattern(),
            settings.header_root().display()
        );
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{Platform, SettingsBuilder};

    #[test]
    fn classifies_by_suffix() {
        assert_eq!(
            classify_header(Path::new("src/enginio_client/enginioclient_p.h"), "_p.h"),
            HeaderKind::Private
        );
        assert_eq!(
            classify_header(Path::new("src/enginio_client/enginioclient.h"), "_p.h"),
            HeaderKind::Public
        );
        // Only the file name counts, not a directory that happens to match.
        assert_eq!(
            classify_header(Path::new("src/odd_p.h/enginio.h"), "_p.h"),
            HeaderKind::Public
        );
    }

    #[tokio::test]
    async fn private_and_public_headers_go_to_separate_trees() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        let client = root.join("src/enginio_client");
        std::fs::create_dir_all(&client).unwrap();
        std::fs::write(client.join("enginioclient.h"), "public").unwrap();
        std::fs::write(client.join("enginioclient_p.h"), "private").unwrap();
        std::fs::write(client.join("enginioclient.cpp"), "source").unwrap();

        let settings = SettingsBuilder::new(root)
            .platform(Platform::Linux)
            .build()
            .unwrap();
        let include = root.join("dist/packages/com.digia.enginio/data/include/Enginio");
        // Forwarding header produced by the build is replaced.
        std::fs::create_dir_all(&include).unwrap();
        std::fs::write(include.join("enginioclient.h"), "#include \"forward\"").unwrap();

        let copied = copy_headers(&settings, "1.0.0", &OutputManager::new(false, true))
            .await
            .unwrap();

        let private = include.join("1.0.0/Enginio/private");
        assert_eq!(copied.len(), 2);
        assert_eq!(std::fs::read_to_string(include.join("enginioclient.h")).unwrap(), "public");
        assert_eq!(
            std::fs::read_to_string(private.join("enginioclient_p.h")).unwrap(),
            "private"
        );
        assert!(!include.join("enginioclient_p.h").exists());
        assert!(!private.join("enginioclient.h").exists());
        assert!(!include.join("enginioclient.cpp").exists());
    }
}
