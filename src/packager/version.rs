//! Module version lookup.
//!
//! The version is read from the build configuration file, from the last
//! line starting with the marker key:
//!
//! ```text
//! MODULE_VERSION = 1.2.3
//! ```

use crate::packager::error::{Error, ErrorExt, Result};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static VERSION_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+(?:\.[0-9]+)*").expect("version pattern is valid"));

/// Extracts the version number from the last `marker` line of `text`.
///
/// Later assignments override earlier ones, as they do in qmake.
///
/// Returns `None` when no marker line carries a version number.
///
/// # Examples
///
/// ```
/// use release_packager::packager::version::parse_version;
///
/// let conf = "load(qt_build_config)\nMODULE_VERSION = 1.2.3\n";
/// assert_eq!(parse_version(conf, "MODULE_VERSION").as_deref(), Some("1.2.3"));
/// ```
pub fn parse_version(text: &str, marker: &str) -> Option<String> {
    text.lines()
        .filter_map(|line| line.trim_start().strip_prefix(marker))
        // Skip keys that merely share the prefix, e.g. MODULE_VERSION_MAJOR.
        .filter_map(|rest| rest.trim_start().strip_prefix('='))
        .filter_map(|value| VERSION_NUMBER.find(value))
        .last()
        .map(|m| m.as_str().to_string())
}

/// Reads `path` and extracts the version number.
///
/// # Errors
///
/// [`Error::VersionNotFound`] when no marker line carries a version.
pub fn read_version(path: &Path, marker: &str) -> Result<String> {
    let text = std::fs::read_to_string(path).fs_context("reading build configuration", path)?;

    parse_version(&text, marker).ok_or_else(|| Error::VersionNotFound {
        marker: marker.to_string(),
        path: path.to_path_buf(),
    })
}
