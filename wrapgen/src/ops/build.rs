//! Build operation: resolve settings, run the pipeline, summarize.

use std::path::PathBuf;

use eyre::{Result, eyre};
use wrapgen_manifest::Manifest;
use wrapgen_pipeline::{
    BuildContext, BuildInputs, CommandCompiler, CommandGenerator, CommandParser, ExternalCommand,
    ExtraCompileOptions, Pipeline, Plugin, Toolchain,
};

use crate::reports::{BuildReport, Output, Report, StatusReport, TerminalOutput};

/// Values given on the command line, layered over the manifest.
#[derive(Debug, Default)]
pub struct BuildOverrides {
    pub declarations: Vec<String>,
    pub addons: Vec<String>,
    pub converters: Vec<PathBuf>,
    pub out: Option<PathBuf>,
}

/// Combine the manifest with command-line overrides.
///
/// `out` from the command line replaces the manifest's; list values extend
/// the manifest's lists.
pub fn resolve_inputs(manifest: &Manifest, overrides: BuildOverrides) -> Result<BuildInputs> {
    let build = &manifest.build;
    let out = overrides
        .out
        .or_else(|| build.out.clone())
        .ok_or_else(|| eyre!("need --out argument"))?;

    let mut inputs = BuildInputs::new(out)
        .declarations(build.declarations.iter().cloned())
        .declarations(overrides.declarations)
        .addons(build.addons.iter().cloned())
        .addons(overrides.addons)
        .converters(build.converters.iter().cloned())
        .converters(overrides.converters);

    inputs.declaration_extension = build.declaration_ext().to_string();
    inputs.source_extension = build.source_ext().to_string();
    inputs.include_dirs = build.include_dirs.clone();
    inputs.search_root = build.search_root.clone();
    inputs.converter_path = build.converter_path.clone();
    inputs.include_boost = manifest.generator.include_boost;

    let extra = ExtraCompileOptions {
        directives: manifest.compiler.directives.clone(),
        cplus: manifest.compiler.cplus,
    };
    inputs.extra_options = (!extra.is_empty()).then_some(extra);

    Ok(inputs)
}

/// The command-backed collaborators configured by the manifest.
pub fn toolchain(manifest: &Manifest) -> Toolchain {
    let parser = ExternalCommand::new(&manifest.parser.command).args(&manifest.parser.args);
    let generator =
        ExternalCommand::new(&manifest.generator.command).args(&manifest.generator.args);
    let compiler = ExternalCommand::new(&manifest.compiler.command).args(&manifest.compiler.args);

    Toolchain::new(
        CommandParser::new(parser),
        CommandGenerator::new(generator),
        CommandCompiler::new(compiler),
    )
}

/// Prints collection warnings and the status summary once inputs are known.
pub struct StatusPlugin;

impl StatusPlugin {
    fn print_warnings(ctx: &BuildContext) {
        let mut out = TerminalOutput::new();
        for warning in ctx.warnings() {
            out.warning(&warning.message);
        }
    }
}

impl Plugin for StatusPlugin {
    fn name(&self) -> &'static str {
        "status"
    }

    fn on_after_phase(&self, phase: &str, ctx: &mut BuildContext) -> Result<()> {
        if phase == "collect" {
            Self::print_warnings(ctx);
            StatusReport::from_context(ctx).render(&mut TerminalOutput::new());
        }
        Ok(())
    }

    fn on_phase_failed(&self, phase: &str, ctx: &BuildContext) {
        if phase == "collect" {
            Self::print_warnings(ctx);
        }
    }
}

/// Run the whole build and summarize the result.
pub fn build(
    inputs: BuildInputs,
    toolchain: Toolchain,
    plugin: Option<StatusPlugin>,
) -> Result<BuildReport> {
    let mut pipeline = Pipeline::new();
    if let Some(plugin) = plugin {
        pipeline = pipeline.plugin(plugin);
    }
    let ctx = pipeline.run(inputs, toolchain)?;
    Ok(BuildReport::from_context(&ctx))
}
