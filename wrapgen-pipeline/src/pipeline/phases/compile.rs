use eyre::Result;

use crate::{
    compile::CompileDriver,
    pipeline::{BuildContext, Phase},
};

/// Compiles the generated source with the merged options.
pub struct CompilePhase;

impl Phase for CompilePhase {
    fn name(&self) -> &'static str {
        "compile"
    }

    fn description(&self) -> &'static str {
        "Compile the generated source"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let driver = CompileDriver::new(ctx.toolchain.compiler.as_ref());
        let options = driver.compile(
            &ctx.inputs.out,
            &ctx.include_dirs,
            ctx.inputs.extra_options.as_ref(),
        )?;
        ctx.compile_options = Some(options);
        Ok(())
    }
}
