//! External tool names.

use super::{Platform, RunPathTool};

/// Executables invoked by the pipeline.
///
/// Names are resolved on `PATH` at invocation time, so absolute paths work
/// as well.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolSettings {
    /// Working tree cleaner (`git clean -xdf`).
    pub git: String,
    /// Build file generator.
    pub qmake: String,
    /// Build tool.
    pub make: String,
    /// Tool running the `docs` target.
    pub docs_make: String,
    /// Installer generator.
    pub binarycreator: String,
    /// Run path patching tool, used on Linux.
    pub runpath_tool: RunPathTool,
    /// Overrides the executable of `runpath_tool`.
    pub runpath_program: Option<String>,
    /// Disk image creation tool, used on macOS.
    pub disk_image_tool: String,
}

impl ToolSettings {
    /// Tool defaults for a platform.
    ///
    /// Windows builds with `jom` but runs the docs target through `nmake`,
    /// since `jom` does not handle that subtarget.
    pub fn for_platform(platform: Platform) -> Self {
        let (make, docs_make) = match platform {
            Platform::Windows => ("jom", "nmake"),
            _ => ("make", "make"),
        };

        Self {
            git: "git".into(),
            qmake: "qmake".into(),
            make: make.into(),
            docs_make: docs_make.into(),
            binarycreator: "binarycreator".into(),
            runpath_tool: RunPathTool::default(),
            runpath_program: None,
            disk_image_tool: "hdiutil".into(),
        }
    }

    /// Executable used for run path patching.
    pub fn runpath_program(&self) -> &str {
        self.runpath_program
            .as_deref()
            .unwrap_or_else(|| self.runpath_tool.program())
    }
}
