//! Build report data structures.

use std::path::PathBuf;

use wrapgen_pipeline::BuildContext;

use super::output::{Output, Report};

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    /// The generated and compiled source.
    pub target: PathBuf,
    pub declaration_files: usize,
    /// Converters in the final table, after shadowing.
    pub converters: usize,
    /// Include path handed to the compiler, in order.
    pub include_dirs: Vec<PathBuf>,
    /// Compiler directives as `key=value`.
    pub directives: Vec<String>,
    pub cplus: bool,
}

impl BuildReport {
    pub fn from_context(ctx: &BuildContext) -> Self {
        let (directives, cplus) = match &ctx.compile_options {
            Some(options) => (
                options
                    .directives
                    .iter()
                    .map(|(key, value)| format!("{}={}", key, value))
                    .collect(),
                options.cplus,
            ),
            None => (Vec::new(), false),
        };

        Self {
            target: ctx.inputs.out.clone(),
            declaration_files: ctx.declaration_files.len(),
            converters: ctx
                .request
                .as_ref()
                .map(|request| request.converters.len())
                .unwrap_or_default(),
            include_dirs: ctx.include_dirs.clone(),
            directives,
            cplus,
        }
    }
}

impl Report for BuildReport {
    fn render(&self, out: &mut dyn Output) {
        let mode = if self.cplus { "C++" } else { "C" };
        out.key_value(
            "Generated",
            &format!("{} ({} mode)", self.target.display(), mode),
        );
        out.key_value("Declaration files", &self.declaration_files.to_string());
        out.key_value("Converters", &self.converters.to_string());

        if self.include_dirs.is_empty() {
            out.key_value("Include path", "(empty)");
        } else {
            out.section("Include path");
            for dir in &self.include_dirs {
                out.list_item(&dir.display().to_string());
            }
        }

        out.key_value("Directives", &self.directives.join(", "));
    }
}
