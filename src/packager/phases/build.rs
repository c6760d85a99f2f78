//! Configure, compile and build documentation.

use crate::cli::OutputManager;
use crate::packager::{
    error::{ErrorExt, Result},
    process::{ToolCommand, run_checked},
    settings::Settings,
};

/// Generates build files, compiles the module and builds its documentation.
///
/// # Process
///
/// 1. Create the build tree
/// 2. `qmake <source-root>` inside it
/// 3. `make` with stdout discarded
/// 4. `make docs` (`nmake docs` on Windows)
///
/// The first failing step aborts the build.
pub async fn build_module(settings: &Settings, output: &OutputManager) -> Result<()> {
    let build_dir = settings.build_dir();
    let tools = settings.tools();

    tokio::fs::create_dir_all(build_dir)
        .await
        .fs_context("creating build directory", build_dir)?;

    run_checked(
        &ToolCommand::new(&tools.qmake)
            .arg(settings.source_root())
            .current_dir(build_dir),
    )
    .await?;

    output.progress(&format!("Compiling {}...", settings.module()))?;

    run_checked(
        &ToolCommand::new(&tools.make)
            .current_dir(build_dir)
            .discard_stdout(),
    )
    .await?;

    run_checked(
        &ToolCommand::new(&tools.docs_make)
            .arg("docs")
            .current_dir(build_dir),
    )
    .await
}

/// Queries the build spec from the build file generator.
///
/// Used for online installer names when no spec is configured.
pub async fn query_build_spec(settings: &Settings) -> Result<String> {
    let spec = crate::packager::process::capture_checked(
        &ToolCommand::new(&settings.tools().qmake)
            .args(["-query", "QMAKE_XSPEC"])
            .current_dir(settings.source_root()),
    )
    .await?;

    if spec.is_empty() {
        crate::bail!("{} -query QMAKE_XSPEC returned nothing", settings.tools().qmake);
    }
    Ok(spec)
}
