//! Collaborator traits for the external toolchain.
//!
//! The declaration parser, code generator and compiler are outside the
//! pipeline's concern; it only needs these seams. [`crate::external`] ships
//! implementations that run commands, and the `testing` module ships
//! in-memory ones.

use std::path::{Path, PathBuf};

use eyre::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{compile::CompileOptions, generation::GenerationRequest};

/// Opaque declaration model produced by the parser.
pub type DeclarationModel = Vec<serde_json::Value>;

/// Template instantiations keyed by instance name.
pub type InstanceMap = IndexMap<String, serde_json::Value>;

/// Parser output for one set of declaration files.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedDeclarations {
    #[serde(default)]
    pub declarations: DeclarationModel,
    #[serde(default)]
    pub instances: InstanceMap,
}

/// Turns declaration files into a declaration model.
pub trait DeclarationParser {
    /// Parse `files`, resolving references relative to `search_root`.
    fn parse(&self, files: &[PathBuf], search_root: &Path) -> Result<ParsedDeclarations>;
}

/// Writes the wrapper source described by a request.
pub trait CodeGenerator {
    /// Generate `request.target` and return the include directories the
    /// generated code needs.
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<PathBuf>>;
}

/// Compiles the generated wrapper source.
pub trait Compiler {
    fn compile(&self, target: &Path, options: &CompileOptions) -> Result<()>;
}

/// The three collaborators a build needs.
pub struct Toolchain {
    pub parser: Box<dyn DeclarationParser>,
    pub generator: Box<dyn CodeGenerator>,
    pub compiler: Box<dyn Compiler>,
}

impl Toolchain {
    pub fn new(
        parser: impl DeclarationParser + 'static,
        generator: impl CodeGenerator + 'static,
        compiler: impl Compiler + 'static,
    ) -> Self {
        Self {
            parser: Box::new(parser),
            generator: Box::new(generator),
            compiler: Box::new(compiler),
        }
    }
}

impl std::fmt::Debug for Toolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Toolchain").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parsed_declarations_accepts_partial_json() {
        let parsed: ParsedDeclarations =
            serde_json::from_str(r#"{"declarations": [{"name": "Matrix"}]}"#).unwrap();
        assert_eq!(parsed.declarations.len(), 1);
        assert!(parsed.instances.is_empty());
    }

    #[test]
    fn test_instances_keep_order() {
        let parsed: ParsedDeclarations =
            serde_json::from_str(r#"{"instances": {"Zeta": 1, "Alpha": 2}}"#).unwrap();
        let names: Vec<_> = parsed.instances.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
