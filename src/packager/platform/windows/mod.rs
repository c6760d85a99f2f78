//! Windows-specific steps.

pub mod relocate;
