//! Configuration structures for packaging runs.
//!
//! The constants of a release (tool names, package table, directory layout,
//! platform behavior) live in one [`Settings`] value passed to the
//! orchestrator. [`SettingsBuilder`] layers platform defaults, an optional
//! [`ConfigFile`] and explicit overrides.

mod builder;
mod core;
mod file;
mod package;
mod platform;
mod tools;

pub use builder::SettingsBuilder;
pub use core::Settings;
pub use file::{ConfigFile, DEFAULT_CONFIG_FILE, ToolOverrides};
pub use package::PackageDescriptor;
pub use platform::{Platform, PlatformFixup, RunPathRule, RunPathTool, Variant};
pub use tools::ToolSettings;
