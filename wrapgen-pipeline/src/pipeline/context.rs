//! Build context passed through pipeline phases.

use std::path::PathBuf;

use eyre::{Result, eyre};
use tracing::debug;

use super::{
    BuildInputs,
    diagnostic::Diagnostic,
};
use crate::{
    addons::MergedAddons,
    compile::CompileOptions,
    converters::ConverterTable,
    generation::GenerationRequest,
    toolchain::{ParsedDeclarations, Toolchain},
};

/// State of one build as it moves through the phases.
///
/// Each phase fills in its product; later phases take what they need.
#[derive(Debug)]
pub struct BuildContext {
    pub inputs: BuildInputs,
    pub toolchain: Toolchain,
    /// Declaration files, sorted (populated by the collect phase).
    pub declaration_files: Vec<PathBuf>,
    /// Addon files, sorted (populated by the collect phase).
    pub addon_files: Vec<PathBuf>,
    pub parsed: Option<ParsedDeclarations>,
    pub addons: Option<MergedAddons>,
    pub converters: Option<ConverterTable>,
    /// The request handed to the generator (populated by the generate phase).
    pub request: Option<GenerationRequest>,
    /// Final include path: generator dirs, then caller dirs.
    pub include_dirs: Vec<PathBuf>,
    /// Options the compiler ran with (populated by the compile phase).
    pub compile_options: Option<CompileOptions>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildContext {
    pub fn new(inputs: BuildInputs, toolchain: Toolchain) -> Self {
        Self {
            inputs,
            toolchain,
            declaration_files: Vec::new(),
            addon_files: Vec::new(),
            parsed: None,
            addons: None,
            converters: None,
            request: None,
            include_dirs: Vec::new(),
            compile_options: None,
            diagnostics: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity.is_warning())
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    pub fn add_warning(&mut self, phase: &str, message: impl Into<String>) {
        self.record(Diagnostic::warning(phase, message));
    }

    pub fn add_info(&mut self, phase: &str, message: impl Into<String>) {
        self.record(Diagnostic::info(phase, message));
    }

    fn record(&mut self, diagnostic: Diagnostic) {
        debug!(phase = %diagnostic.phase, "{}", diagnostic);
        self.diagnostics.push(diagnostic);
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_warning())
    }

    /// Take the parsed declarations out of the context.
    pub fn take_parsed(&mut self) -> Result<ParsedDeclarations> {
        self.parsed
            .take()
            .ok_or_else(|| eyre!("declarations not parsed - did the parse phase run?"))
    }

    /// Take the merged addons out of the context.
    pub fn take_addons(&mut self) -> Result<MergedAddons> {
        self.addons
            .take()
            .ok_or_else(|| eyre!("addons not merged - did the merge phase run?"))
    }

    /// Take the converter table out of the context.
    pub fn take_converters(&mut self) -> Result<ConverterTable> {
        self.converters
            .take()
            .ok_or_else(|| eyre!("converters not registered - did the converters phase run?"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeToolchain;

    fn context() -> BuildContext {
        let fakes = FakeToolchain::new(ParsedDeclarations::default());
        BuildContext::new(BuildInputs::new("out.pyx"), fakes.toolchain())
    }

    #[test]
    fn test_context_creation() {
        let ctx = context();
        assert!(ctx.parsed.is_none());
        assert!(ctx.request.is_none());
        assert!(ctx.diagnostics.is_empty());
    }

    #[test]
    fn test_context_diagnostics() {
        let mut ctx = context();
        ctx.add_warning("collect", "ignoring a.txt");
        ctx.add_info("collect", "2 files");

        assert!(ctx.has_warnings());
        assert_eq!(ctx.warning_count(), 1);
        assert_eq!(ctx.diagnostics.len(), 2);
        let warnings: Vec<_> = ctx.warnings().map(|d| d.message.as_str()).collect();
        assert_eq!(warnings, vec!["ignoring a.txt"]);
    }

    #[test]
    fn test_take_before_phase_ran_is_an_error() {
        let mut ctx = context();
        let err = ctx.take_parsed().unwrap_err();
        assert!(err.to_string().contains("parse phase"));
    }
}
