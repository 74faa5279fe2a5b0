//! Status summary printed once inputs are collected.

use wrapgen_pipeline::BuildContext;

use super::output::{Output, Report};

/// Counts of the inputs a build is about to process.
#[derive(Debug)]
pub struct StatusReport {
    /// Declaration extension, without the dot.
    pub declaration_extension: String,
    pub declaration_files: usize,
    pub addon_files: usize,
    pub converter_modules: usize,
}

impl StatusReport {
    pub fn from_context(ctx: &BuildContext) -> Self {
        Self {
            declaration_extension: ctx.inputs.declaration_extension.clone(),
            declaration_files: ctx.declaration_files.len(),
            addon_files: ctx.addon_files.len(),
            converter_modules: ctx.inputs.converters.len(),
        }
    }
}

impl Report for StatusReport {
    fn render(&self, out: &mut dyn Output) {
        out.newline();
        out.section("STATUS");
        out.preformatted(&format!(
            "   {:5} {} input files to parse",
            self.declaration_files, self.declaration_extension
        ));
        out.preformatted(&format!(
            "   {:5} add on files to process",
            self.addon_files
        ));
        out.preformatted(&format!(
            "   {:5} type converter files to consider",
            self.converter_modules
        ));
        out.newline();
    }
}
