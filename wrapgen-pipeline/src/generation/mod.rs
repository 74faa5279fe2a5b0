//! Generation request and coordinator.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};
use wrapgen_core::Version;

use crate::{
    addons::{ManualCode, MergedAddons},
    converters::ConverterTable,
    toolchain::{CodeGenerator, DeclarationModel, InstanceMap, ParsedDeclarations},
};

/// Everything the code generator needs for one run.
///
/// Built once and only read afterwards. Serializes to the JSON document the
/// external generator receives on stdin.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub declarations: DeclarationModel,
    pub instances: InstanceMap,
    pub manual_code: ManualCode,
    /// Addon directive lines to hoist to the top of the generated unit.
    pub extra_directives: Vec<String>,
    pub converters: ConverterTable,
    /// File the generator writes.
    pub target: PathBuf,
    pub include_boost: bool,
    /// Declarations visible to the generator beyond the ones being wrapped.
    pub all_declarations: DeclarationModel,
    pub wrapgen_version: Version,
}

impl GenerationRequest {
    pub fn new(parsed: ParsedDeclarations, target: impl Into<PathBuf>) -> Self {
        Self {
            declarations: parsed.declarations,
            instances: parsed.instances,
            manual_code: ManualCode::default(),
            extra_directives: Vec::new(),
            converters: ConverterTable::default(),
            target: target.into(),
            include_boost: true,
            all_declarations: DeclarationModel::new(),
            wrapgen_version: Version::current(),
        }
    }

    /// Attach merged addons: their directives and manual code.
    pub fn with_addons(mut self, addons: MergedAddons) -> Self {
        self.extra_directives = addons.directives;
        self.manual_code = addons.manual_code;
        self
    }

    pub fn with_converters(mut self, converters: ConverterTable) -> Self {
        self.converters = converters;
        self
    }

    pub fn with_include_boost(mut self, include_boost: bool) -> Self {
        self.include_boost = include_boost;
        self
    }

    pub fn with_all_declarations(mut self, all_declarations: DeclarationModel) -> Self {
        self.all_declarations = all_declarations;
        self
    }

    pub fn target(&self) -> &Path {
        &self.target
    }
}

/// Delegates generation and assembles the include path.
pub struct GenerationCoordinator<'a> {
    generator: &'a dyn CodeGenerator,
}

impl<'a> GenerationCoordinator<'a> {
    pub fn new(generator: &'a dyn CodeGenerator) -> Self {
        Self { generator }
    }

    /// Generate `request.target`.
    ///
    /// Returns the directories the generator reported followed by
    /// `extra_include_dirs`. The declaration model is passed through
    /// untouched.
    pub fn generate(
        &self,
        request: &GenerationRequest,
        extra_include_dirs: &[PathBuf],
    ) -> Result<Vec<PathBuf>> {
        info!(
            target = %request.target.display(),
            declarations = request.declarations.len(),
            converters = request.converters.len(),
            "generating wrapper source"
        );

        let mut include_dirs = self
            .generator
            .generate(request)
            .wrap_err_with(|| format!("failed to generate {}", request.target.display()))?;
        debug!(reported = include_dirs.len(), "generator include dirs");

        include_dirs.extend(extra_include_dirs.iter().cloned());
        Ok(include_dirs)
    }
}
