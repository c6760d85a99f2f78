//! Package descriptors: which paths each installer component bundles.

use super::Platform;
use serde::Deserialize;
use std::path::PathBuf;

/// Installer component and the relative paths it bundles.
///
/// Each path is resolved against the source tree first and the build tree
/// second, then copied to `<staging>/<id>/data/<path>`.
///
/// # Examples
///
/// ```
/// use release_packager::packager::PackageDescriptor;
///
/// let docs = PackageDescriptor::new("com.digia.enginioDocumentation", ["doc/enginio-qt"]);
/// assert_eq!(docs.paths.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PackageDescriptor {
    /// Installer Framework component identifier.
    pub id: String,

    /// Relative paths, staged in order.
    pub paths: Vec<PathBuf>,
}

impl PackageDescriptor {
    /// Creates a descriptor from an identifier and its paths.
    pub fn new<I, P>(id: impl Into<String>, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            id: id.into(),
            paths: paths.into_iter().map(Into::into).collect(),
        }
    }

    /// The Enginio component table.
    ///
    /// On Windows the main component also ships `bin`, where the post-build
    /// fixup moves the DLLs.
    pub fn default_table(platform: Platform) -> Vec<Self> {
        let main: &[&str] = match platform {
            Platform::Windows => &["bin", "include", "lib", "qml"],
            _ => &["include", "lib", "qml"],
        };
        vec![
            Self::new("com.digia.enginio", main.iter().copied()),
            Self::new("com.digia.enginioExamples", ["examples"]),
            Self::new("com.digia.enginioSources", ["src"]),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_main_component_ships_runtime_dir() {
        let windows = PackageDescriptor::default_table(Platform::Windows);
        assert_eq!(windows[0].paths[0], PathBuf::from("bin"));

        let linux = PackageDescriptor::default_table(Platform::Linux);
        assert!(!linux[0].paths.contains(&PathBuf::from("bin")));
        assert_eq!(linux.len(), 3);
    }
}
