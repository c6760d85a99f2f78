//! Glob matching below a fixed root.

use crate::packager::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Returns the paths matching `pattern` below `root`, in sorted order.
///
/// `root` is escaped, so only `pattern` carries wildcards.
pub fn glob_in(root: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let full = format!(
        "{}/{}",
        glob::Pattern::escape(&root.to_string_lossy()),
        pattern.trim_start_matches('/')
    );

    let entries = glob::glob(&full).map_err(|error| Error::Pattern {
        pattern: full.clone(),
        error,
    })?;

    let mut matches = entries.collect::<std::result::Result<Vec<_>, _>>()?;
    matches.sort();
    Ok(matches)
}
