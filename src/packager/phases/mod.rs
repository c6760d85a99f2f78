//! Pipeline phases.
//!
//! Each phase is a free function over [`Settings`](crate::packager::Settings);
//! the [`Packager`](crate::packager::Packager) runs them in order.

pub mod build;
pub mod clean;
pub mod fixup;
pub mod headers;
pub mod installer;
pub mod module_descriptor;
pub mod stage;
