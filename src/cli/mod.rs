//! Command line interface for the release packager.
//!
//! This module parses arguments, layers the configuration and runs the
//! pipeline.

mod args;
mod output;

pub use args::{Args, RuntimeConfig};
pub use output::OutputManager;

use crate::error::Result;
use anyhow::Context;
use crate::packager::{
    ConfigFile, Packager, Settings, SettingsBuilder, settings::DEFAULT_CONFIG_FILE,
};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    args.validate()?;

    let settings = load_settings(&args)?;
    let runtime = RuntimeConfig::from(&args);

    if args.skip_build && !settings.build_dir().is_dir() {
        runtime.output().warn(&format!(
            "{} does not exist; build artifacts cannot be staged",
            settings.build_dir().display()
        ))?;
    }

    let packager =
        Packager::new(settings, runtime.output().clone()).with_phases(runtime.phases());
    packager.run().await?;

    Ok(0)
}

/// Builds settings from defaults, the configuration file and the arguments.
///
/// An explicit `--config` must exist; the default location is optional.
pub fn load_settings(args: &Args) -> Result<Settings> {
    let config = match &args.config {
        Some(path) => Some(
            ConfigFile::load(path)
                .with_context(|| format!("loading configuration {}", path.display()))?,
        ),
        None => {
            let path = args.source_root.join("dist").join(DEFAULT_CONFIG_FILE);
            ConfigFile::load_optional(&path)
                .with_context(|| format!("loading configuration {}", path.display()))?
        }
    };

    let mut builder = SettingsBuilder::new(&args.source_root);
    if let Some(config) = config {
        builder = builder.config_file(config);
    }
    if let Some(variant) = args.variant {
        builder = builder.variant(variant);
    }
    if let Some(spec) = &args.build_spec {
        builder = builder.build_spec(spec.clone());
    }

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("release_packager").chain(argv.iter().copied()))
            .unwrap()
    }

    #[test]
    fn broken_configuration_names_file_and_cause() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("dist")).unwrap();
        let config = tmp.path().join("dist/packager.toml");
        std::fs::write(&config, "platform = \"beos\"").unwrap();

        let root = tmp.path().to_str().unwrap();
        let err = load_settings(&args(&["--source-root", root])).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("loading configuration"));
        assert!(message.contains("packager.toml"));
        assert!(message.contains("beos"));
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn explicit_configuration_must_exist() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("absent.toml");

        let err = load_settings(&args(&["--config", missing.to_str().unwrap()])).unwrap_err();
        assert!(err.to_string().contains("absent.toml"));
    }

    #[test]
    fn flags_override_configuration() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(tmp.path().join("dist")).unwrap();
        std::fs::write(
            tmp.path().join("dist/packager.toml"),
            "variant = \"offline\"\nbuild_spec = \"win32-msvc\"",
        )
        .unwrap();

        let root = tmp.path().to_str().unwrap();
        let settings = load_settings(&args(&[
            "--source-root",
            root,
            "--variant",
            "online",
            "--build-spec",
            "linux-g++",
        ]))
        .unwrap();

        assert_eq!(settings.variant(), crate::packager::Variant::Online);
        assert_eq!(settings.build_spec(), Some("linux-g++"));
    }
}
