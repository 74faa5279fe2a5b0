//! Core operations.
//!
//! Business logic for the wrapgen binary, separated from argument parsing
//! and output rendering.

pub mod build;

pub use build::{BuildOverrides, StatusPlugin, build, resolve_inputs, toolchain};
