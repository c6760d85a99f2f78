//! Platform-specific steps.
//!
//! These modules are compiled on every host: which one runs is decided by
//! the configured [`Platform`](crate::packager::Platform), not by the build
//! target, so a fixup can be exercised anywhere its tool is installed.

pub mod linux;
pub mod macos;
pub mod windows;
