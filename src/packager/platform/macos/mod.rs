//! macOS-specific steps.

pub mod dmg;
