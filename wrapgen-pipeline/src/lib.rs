//! The merge-and-drive pipeline behind wrapgen.
//!
//! A run collects declaration and addon files, splits addons into directives
//! and per-entity bodies, registers converter modules, asks the code
//! generator for the wrapper source and finally hands it to the compiler.
//!
//! # Module Organization
//!
//! - [`collect`] - resolve paths, globs and directories into file lists
//! - [`addons`] - split addon files and accumulate manual code
//! - [`converters`] - converter module loading and registration
//! - [`generation`] - generation request and coordinator
//! - [`compile`] - compiler options and driver
//! - [`toolchain`] - collaborator traits (parser, generator, compiler)
//! - [`external`] - collaborators backed by external commands
//! - [`pipeline`] - phased orchestration with diagnostics
//! - [`testing`] - in-memory collaborators (feature-gated)

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod addons;
pub mod collect;
pub mod compile;
pub mod converters;
pub mod external;
pub mod generation;
pub mod pipeline;
pub mod toolchain;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use addons::{AddonFile, ManualCode, MergedAddons, merge_addons};
pub use collect::{CollectedFiles, collect};
pub use compile::{CompileDriver, CompileOptions, ExtraCompileOptions};
pub use converters::{
    ConverterError, ConverterRegistry, ConverterSpec, ConverterTable, Registrar, SearchPath,
};
pub use external::{CommandCompiler, CommandGenerator, CommandParser, ExternalCommand, ToolFailed};
pub use generation::{GenerationCoordinator, GenerationRequest};
pub use pipeline::{
    BuildContext, BuildError, BuildInputs, Diagnostic, Phase, Pipeline, Plugin, Severity,
};
pub use toolchain::{
    CodeGenerator, Compiler, DeclarationModel, DeclarationParser, InstanceMap,
    ParsedDeclarations, Toolchain,
};
