//! Core types shared across the wrapgen crates.
//!
//! This crate holds the small vocabulary every stage of the build agrees on:
//! the tool version, compiler option values and file-extension helpers.

mod option;
mod paths;
mod version;

pub use option::OptionValue;
pub use paths::{entity_key, has_extension, normalize_extension};
pub use version::Version;
