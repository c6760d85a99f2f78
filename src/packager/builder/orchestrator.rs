//! Main packaging orchestration.
//!
//! This module provides the [`Packager`] that runs the release pipeline:
//! clean, build, platform fixup, stage, package.

use crate::cli::OutputManager;
use crate::packager::{
    ArtifactKind, PackagedArtifact, Result,
    phases::{build, clean, fixup, headers, installer, module_descriptor, stage},
    platform::macos::dmg,
    settings::{Settings, Variant},
    version::read_version,
};
use std::path::PathBuf;

use super::{
    checksum::digest_artifact,
    tool_detection::{PhaseSelection, check_tools},
};

/// Release pipeline orchestrator.
///
/// Runs each phase to completion before the next one starts. The first
/// failure aborts the run; nothing is rolled back, so a failed run leaves
/// the staging tree for manual inspection.
///
/// # Examples
///
/// ```no_run
/// use release_packager::cli::OutputManager;
/// use release_packager::packager::{Packager, SettingsBuilder};
///
/// # async fn example() -> release_packager::packager::Result<()> {
/// let settings = SettingsBuilder::new(".").build()?;
/// let packager = Packager::new(settings, OutputManager::default());
///
/// for artifact in packager.run().await? {
///     println!("{} ({} bytes) sha256 {}", artifact.path.display(), artifact.size, artifact.checksum);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Packager {
    settings: Settings,
    output: OutputManager,
    phases: PhaseSelection,
}

impl Packager {
    /// Creates a packager running every phase.
    pub fn new(settings: Settings, output: OutputManager) -> Self {
        Self {
            settings,
            output,
            phases: PhaseSelection::default(),
        }
    }

    /// Selects which of the optional leading phases run.
    pub fn with_phases(mut self, phases: PhaseSelection) -> Self {
        self.phases = phases;
        self
    }

    /// Returns a reference to the packaging settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Runs the pipeline.
    ///
    /// # Returns
    ///
    /// The installer, followed by the disk image when one is produced.
    pub async fn run(&self) -> Result<Vec<PackagedArtifact>> {
        check_tools(&self.settings, self.phases)?;

        let version = read_version(
            self.settings.build_config_file(),
            self.settings.version_marker(),
        )?;
        log::info!("Packaging {} {}", self.settings.module(), version);

        if self.phases.clean {
            self.output.section("Clean")?;
            clean::clean_checkout(&self.settings).await?;
        }

        if self.phases.build {
            self.output.section("Build")?;
            build::build_module(&self.settings, &self.output).await?;

            let fixed = fixup::apply_fixup(&self.settings).await?;
            if !fixed.is_empty() {
                self.output
                    .verbose(&format!("Fixed up {} built libraries", fixed.len()))?;
            }
        }

        self.output.section("Stage")?;
        self.output.progress("Creating installer...")?;
        self.stage(&version).await?;

        self.output.section("Package")?;
        let artifacts = self.package(&version).await?;
        self.output.success("Installer created.")?;

        for artifact in &artifacts {
            self.output.indent(&format!(
                "{} ({} bytes) sha256 {}",
                artifact.path.display(),
                artifact.size,
                artifact.checksum
            ))?;
        }

        Ok(artifacts)
    }

    /// Stages packages, headers and the module descriptor.
    pub async fn stage(&self, version: &str) -> Result<()> {
        stage::stage_packages(&self.settings, &self.output).await?;
        headers::copy_headers(&self.settings, version, &self.output).await?;
        module_descriptor::copy_module_descriptor(&self.settings).await?;
        Ok(())
    }

    /// Generates the installer and, if configured, the disk image.
    pub async fn package(&self, version: &str) -> Result<Vec<PackagedArtifact>> {
        let spec = self.build_spec().await?;
        let name = installer::artifact_name(
            self.settings.installer_prefix(),
            version,
            spec.as_deref(),
        );

        let installer_path = installer::generate_installer(&self.settings, &name).await?;
        let mut artifacts = vec![describe(ArtifactKind::Installer, installer_path.clone()).await?];

        if self.settings.disk_image() {
            let image = dmg::create_disk_image(
                &self.settings.tools().disk_image_tool,
                &installer_path,
                &name,
            )
            .await?;
            artifacts.push(describe(ArtifactKind::DiskImage, image).await?);
        }

        Ok(artifacts)
    }

    /// Build spec for the artifact name; `None` for offline installers.
    async fn build_spec(&self) -> Result<Option<String>> {
        if self.settings.variant() == Variant::Offline {
            return Ok(None);
        }
        match self.settings.build_spec() {
            Some(spec) => Ok(Some(spec.to_string())),
            None => build::query_build_spec(&self.settings).await.map(Some),
        }
    }
}

async fn describe(kind: ArtifactKind, path: PathBuf) -> Result<PackagedArtifact> {
    let digest = digest_artifact(&path).await?;
    log::info!("{} {} sha256 {}", kind, path.display(), digest.sha256);

    Ok(PackagedArtifact {
        kind,
        path,
        size: digest.size,
        checksum: digest.sha256,
    })
}
