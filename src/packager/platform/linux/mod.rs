//! Linux-specific steps.

pub mod runpath;
