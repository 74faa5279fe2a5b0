use indexmap::IndexMap;
use serde::Deserialize;
use wrapgen_core::OptionValue;

/// An external command: program plus leading arguments.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    #[serde(default = "default_parser_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

fn default_parser_command() -> String {
    "wrapgen-parser".to_string()
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            command: default_parser_command(),
            args: Vec::new(),
        }
    }
}

/// The `[generator]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    #[serde(default = "default_generator_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Whether generated code may include the boost helper headers.
    #[serde(default = "default_include_boost")]
    pub include_boost: bool,
}

fn default_generator_command() -> String {
    "wrapgen-generator".to_string()
}

fn default_include_boost() -> bool {
    true
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            command: default_generator_command(),
            args: Vec::new(),
            include_boost: default_include_boost(),
        }
    }
}

/// The `[compiler]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompilerConfig {
    #[serde(default = "default_compiler_command")]
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
    /// Overrides the C++ (native interop) mode of the baseline.
    pub cplus: Option<bool>,
    /// Per-key overrides of the baseline compiler directives.
    #[serde(default)]
    pub directives: IndexMap<String, OptionValue>,
}

fn default_compiler_command() -> String {
    "cython".to_string()
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            command: default_compiler_command(),
            args: Vec::new(),
            cplus: None,
            directives: IndexMap::new(),
        }
    }
}
