//! Manifest types and parsing for wrapgen.toml files.

mod build;
mod file;
mod parse;
mod tools;

pub use build::BuildConfig;
pub use file::WrapgenToml;
use serde::Deserialize;
pub use tools::{CompilerConfig, GeneratorConfig, ToolConfig};

/// Default configuration file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "wrapgen.toml";

/// Root manifest for wrapgen.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Inputs, output target and file conventions.
    #[serde(default)]
    pub build: BuildConfig,

    /// Declaration parser invocation.
    #[serde(default)]
    pub parser: ToolConfig,

    /// Code generator invocation.
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Compiler toolchain invocation and option overrides.
    #[serde(default)]
    pub compiler: CompilerConfig,
}
