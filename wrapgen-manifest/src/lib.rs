//! Configuration file support for wrapgen.
//!
//! A project may carry a `wrapgen.toml` describing its inputs, the external
//! tools to run and compiler overrides. Command-line flags take precedence
//! over the file; the file takes precedence over built-in defaults.

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod manifest;

pub use error::{Error, Result, SourceContext};
pub use manifest::{
    BuildConfig, CONFIG_FILE_NAME, CompilerConfig, GeneratorConfig, Manifest, ToolConfig,
    WrapgenToml,
};
