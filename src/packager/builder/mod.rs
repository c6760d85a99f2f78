//! Pipeline orchestration and coordination.
//!
//! This module provides the main [`Packager`] orchestrator.
//!
//! # Overview
//!
//! The packager:
//! 1. Checks that every required tool is installed
//! 2. Reads the module version
//! 3. Cleans the checkout and builds the module
//! 4. Applies the platform fixup to the build tree
//! 5. Stages packages, headers and the module descriptor
//! 6. Generates the installer (and disk image), with checksums
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Packager`] struct
//! - [`tool_detection`] - External tool availability checking

pub mod checksum;
mod orchestrator;
pub mod tool_detection;

pub use orchestrator::Packager;
pub use tool_detection::PhaseSelection;
