//! Module descriptor staging.
//!
//! The `.pri` file qmake writes to `mkspecs/modules-inst` describes the
//! installed module (as opposed to the one in `mkspecs/modules`, which points
//! into the build tree), so that is the one shipped.

use crate::packager::{
    error::{Error, Result},
    settings::Settings,
    utils::fs::{copy_file, ensure_absent},
};
use std::path::PathBuf;

/// Copies the installed-module descriptor into the main package.
///
/// # Errors
///
/// [`Error::MissingSource`] if the build did not produce the descriptor,
/// [`Error::DestinationExists`] if it is already staged.
pub async fn copy_module_descriptor(settings: &Settings) -> Result<PathBuf> {
    let source = settings.module_descriptor_source();
    let destination = settings.module_descriptor_destination();

    if !source.is_file() {
        return Err(Error::MissingSource { path: source });
    }
    ensure_absent(&destination)?;

    log::info!("Copying module descriptor {}", source.display());
    copy_file(&source, &destination).await?;
    Ok(destination)
}
