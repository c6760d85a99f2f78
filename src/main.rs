//! Release Packager - Qt Installer Framework release builder.
//!
//! This binary cleans the checkout, builds the module, stages its artifacts
//! and generates the installer. The exit code is 0 on success, the failing
//! tool's exit code when an external tool fails, and 1 otherwise.

use release_packager::cli::{self, OutputManager};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize logging
    env_logger::init();

    // Run CLI and get exit code
    let exit_code = match cli::run().await {
        Ok(code) => code,
        Err(e) => {
            let _ = OutputManager::default().error(&e.to_string());
            e.exit_code()
        }
    };

    process::exit(exit_code);
}
