use eyre::Result;

use crate::{
    generation::{GenerationCoordinator, GenerationRequest},
    pipeline::{BuildContext, Phase},
};

/// Assembles the generation request and runs the generator.
pub struct GeneratePhase;

impl Phase for GeneratePhase {
    fn name(&self) -> &'static str {
        "generate"
    }

    fn description(&self) -> &'static str {
        "Generate the wrapper source"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let request = GenerationRequest::new(ctx.take_parsed()?, ctx.inputs.out.clone())
            .with_addons(ctx.take_addons()?)
            .with_converters(ctx.take_converters()?)
            .with_include_boost(ctx.inputs.include_boost)
            .with_all_declarations(ctx.inputs.all_declarations.clone());

        let coordinator = GenerationCoordinator::new(ctx.toolchain.generator.as_ref());
        ctx.include_dirs = coordinator.generate(&request, &ctx.inputs.include_dirs)?;
        ctx.request = Some(request);
        Ok(())
    }
}
