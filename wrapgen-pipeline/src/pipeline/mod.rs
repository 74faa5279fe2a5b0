//! Phased build orchestration.
//!
//! A [`Pipeline`] runs the build as explicit phases over a shared
//! [`BuildContext`]:
//!
//! - collect → parse → merge → converters → generate → compile
//! - plugin hooks before and after each phase
//! - diagnostics for everything that is not fatal
//!
//! # Example
//!
//! ```ignore
//! use wrapgen_pipeline::{BuildInputs, Pipeline};
//!
//! let inputs = BuildInputs::new("wrapped.pyx").declarations(["pxds"]);
//! let ctx = Pipeline::new().run(inputs, toolchain)?;
//!
//! for warning in ctx.warnings() {
//!     eprintln!("warning: {}", warning.message);
//! }
//! ```

mod context;
mod diagnostic;
mod error;
mod inputs;
mod phase;
pub mod phases;
mod plugin;
mod runner;

pub use context::BuildContext;
pub use diagnostic::{Diagnostic, Severity};
pub use error::BuildError;
pub use inputs::BuildInputs;
pub use phase::Phase;
pub use plugin::Plugin;
pub use runner::Pipeline;
