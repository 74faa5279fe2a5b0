//! Pipeline orchestrator.

use eyre::Result;
use tracing::{debug, info_span};
use wrapgen_core::{has_extension, normalize_extension};

use super::{
    BuildContext, BuildError, BuildInputs, Phase, Plugin,
    phases::{
        CollectPhase, CompilePhase, ConvertersPhase, GeneratePhase, MergePhase, ParsePhase,
    },
};
use crate::toolchain::Toolchain;

/// Runs the build phases in order.
///
/// The built-in phases (collect, parse, merge, converters, generate,
/// compile) always run; extra phases run after them. Plugins are called
/// before and after every phase.
///
/// # Example
///
/// ```ignore
/// let ctx = Pipeline::new()
///     .plugin(StatusPlugin)
///     .run(inputs, toolchain)?;
///
/// println!("include path: {:?}", ctx.include_dirs);
/// ```
#[derive(Default)]
pub struct Pipeline {
    phases: Vec<Box<dyn Phase>>,
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a phase to run after the built-in phases.
    pub fn phase(mut self, phase: impl Phase + 'static) -> Self {
        self.phases.push(Box::new(phase));
        self
    }

    /// Add a plugin to receive phase lifecycle hooks.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Run a build.
    ///
    /// The output path is checked first: with the wrong extension nothing is
    /// collected, generated or compiled. Any failing phase stops the run.
    pub fn run(&self, inputs: BuildInputs, toolchain: Toolchain) -> Result<BuildContext> {
        let source_ext = normalize_extension(&inputs.source_extension);
        if !has_extension(&inputs.out, source_ext) {
            return Err(BuildError::WrongOutExtension {
                required: source_ext.to_string(),
            }
            .into());
        }

        let mut ctx = BuildContext::new(inputs, toolchain);

        let builtin_phases: Vec<Box<dyn Phase>> = vec![
            Box::new(CollectPhase),
            Box::new(ParsePhase),
            Box::new(MergePhase),
            Box::new(ConvertersPhase),
            Box::new(GeneratePhase),
            Box::new(CompilePhase),
        ];

        for phase in builtin_phases.iter().chain(self.phases.iter()) {
            self.run_phase(phase.as_ref(), &mut ctx)?;
        }

        Ok(ctx)
    }

    fn run_phase(&self, phase: &dyn Phase, ctx: &mut BuildContext) -> Result<()> {
        let phase_name = phase.name();
        let _span = info_span!("phase", name = phase_name).entered();
        debug!(description = phase.description(), "starting phase");

        for plugin in &self.plugins {
            plugin.on_before_phase(phase_name, ctx)?;
        }

        if let Err(err) = phase.run(ctx) {
            for plugin in &self.plugins {
                plugin.on_phase_failed(phase_name, ctx);
            }
            return Err(err);
        }

        for plugin in &self.plugins {
            plugin.on_after_phase(phase_name, ctx)?;
        }

        debug!("finished phase");
        Ok(())
    }
}
