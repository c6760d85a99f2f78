//! External tool availability checking.
//!
//! The pipeline resolves every tool it will need before touching the
//! checkout, so a missing installer generator is reported before a long
//! build rather than after it.

use crate::packager::{
    error::Result,
    process::resolve_tool,
    settings::{PlatformFixup, Settings, Variant},
};

/// Phases selected for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseSelection {
    /// Run `git clean` first.
    pub clean: bool,
    /// Configure, compile and build docs.
    pub build: bool,
}

impl Default for PhaseSelection {
    fn default() -> Self {
        Self {
            clean: true,
            build: true,
        }
    }
}

/// Lists the tools a run with `phases` will invoke, in invocation order.
pub fn required_tools(settings: &Settings, phases: PhaseSelection) -> Vec<String> {
    let tools = settings.tools();
    let mut required = Vec::new();

    if phases.clean {
        required.push(tools.git.clone());
    }
    if phases.build {
        required.push(tools.qmake.clone());
        required.push(tools.make.clone());
        required.push(tools.docs_make.clone());
    } else if settings.variant() == Variant::Online && settings.build_spec().is_none() {
        // The build spec query still needs qmake.
        required.push(tools.qmake.clone());
    }
    if phases.build {
        if let PlatformFixup::PatchRunPath { rules } = settings.fixup() {
            if !rules.is_empty() {
                required.push(tools.runpath_program().to_string());
            }
        }
    }
    required.push(tools.binarycreator.clone());
    if settings.disk_image() {
        required.push(tools.disk_image_tool.clone());
    }

    required.dedup();
    required
}

/// Resolves every required tool, failing on the first one missing.
pub fn check_tools(settings: &Settings, phases: PhaseSelection) -> Result<()> {
    for tool in required_tools(settings, phases) {
        let path = resolve_tool(&tool)?;
        log::debug!("Found {} at: {}", tool, path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packager::settings::{Platform, SettingsBuilder};

    #[test]
    fn linux_full_run_needs_runpath_tool() {
        let settings = SettingsBuilder::new("/work")
            .platform(Platform::Linux)
            .build()
            .unwrap();

        assert_eq!(
            required_tools(&settings, PhaseSelection::default()),
            vec!["git", "qmake", "make", "chrpath", "binarycreator"]
        );
    }

    #[test]
    fn macos_repackage_needs_generator_and_hdiutil() {
        let settings = SettingsBuilder::new("/work")
            .platform(Platform::MacOs)
            .build()
            .unwrap();

        let phases = PhaseSelection {
            clean: false,
            build: false,
        };
        assert_eq!(required_tools(&settings, phases), vec!["binarycreator", "hdiutil"]);
    }

    #[test]
    fn online_without_spec_needs_qmake_query() {
        let settings = SettingsBuilder::new("/work")
            .platform(Platform::Windows)
            .variant(Variant::Online)
            .build()
            .unwrap();

        let phases = PhaseSelection {
            clean: false,
            build: false,
        };
        assert_eq!(required_tools(&settings, phases), vec!["qmake", "binarycreator"]);
    }
}
