//! Working tree cleanup.

use crate::packager::{
    error::Result,
    process::{ToolCommand, run_checked},
    settings::Settings,
};

/// Removes untracked and ignored files from the source checkout.
///
/// Runs `git clean -xdf` in the source root.
pub async fn clean_checkout(settings: &Settings) -> Result<()> {
    log::info!("Cleaning {}", settings.source_root().display());

    run_checked(
        &ToolCommand::new(&settings.tools().git)
            .args(["clean", "-xdf"])
            .current_dir(settings.source_root()),
    )
    .await
}
