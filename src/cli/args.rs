//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Every argument is
//! optional: a bare invocation packages the checkout in the current
//! directory with the host platform's defaults.

use crate::error::CliError;
use crate::packager::{PhaseSelection, Variant};
use clap::Parser;
use std::path::PathBuf;

/// Qt module release packager
#[derive(Parser, Debug)]
#[command(
    name = "release_packager",
    version,
    about = "Builds a Qt module and packages it with the Qt Installer Framework",
    long_about = "Cleans the checkout, builds the module and its documentation, stages the
build output into installer packages and runs binarycreator.

Usage:
  release_packager
  release_packager --source-root ~/src/enginio --variant online --build-spec linux-g++
  release_packager --skip-clean --skip-build

Exit code 0 = installer created. A failing tool's exit code is passed through;
missing sources or existing staging paths exit with 1."
)]
pub struct Args {
    /// Root of the source checkout
    #[arg(short = 's', long, value_name = "DIR", default_value = ".")]
    pub source_root: PathBuf,

    /// Configuration file (default: <source-root>/dist/packager.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Release variant
    #[arg(long, value_enum, value_name = "VARIANT")]
    pub variant: Option<Variant>,

    /// Build spec embedded in online installer names (default: qmake -query QMAKE_XSPEC)
    #[arg(long, value_name = "SPEC")]
    pub build_spec: Option<String>,

    /// Do not run `git clean` before building
    #[arg(long)]
    pub skip_clean: bool,

    /// Package an existing build tree instead of building
    #[arg(long)]
    pub skip_build: bool,

    /// Print per-file staging detail
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only print warnings and errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), CliError> {
        if self.skip_build && !self.skip_clean {
            // Cleaning removes the build tree the packaging would read.
            return Err(CliError::ConflictingArguments {
                arguments: vec!["--skip-build".into(), "(without) --skip-clean".into()],
            });
        }

        if self.variant == Some(Variant::Offline) && self.build_spec.is_some() {
            return Err(CliError::ConflictingArguments {
                arguments: vec!["--variant offline".into(), "--build-spec".into()],
            });
        }

        if let Some(spec) = &self.build_spec {
            if spec.trim().is_empty() {
                return Err(CliError::InvalidArguments {
                    reason: "build spec cannot be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}

/// Configuration derived from command line arguments
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Output manager for terminal output
    output: super::OutputManager,

    /// Leading phases to run
    phases: PhaseSelection,
}

impl From<&Args> for RuntimeConfig {
    fn from(args: &Args) -> Self {
        let output = super::OutputManager::new(args.verbose, args.quiet);

        Self {
            output,
            phases: PhaseSelection {
                clean: !args.skip_clean,
                build: !args.skip_build,
            },
        }
    }
}

impl RuntimeConfig {
    /// Get a reference to the output manager
    pub fn output(&self) -> &super::OutputManager {
        &self.output
    }

    /// Phases selected on the command line
    pub fn phases(&self) -> PhaseSelection {
        self.phases
    }
}
