use eyre::{Context, Result};
use tracing::info;

use crate::pipeline::{BuildContext, Phase};

/// Hands the declaration files to the parser collaborator.
pub struct ParsePhase;

impl Phase for ParsePhase {
    fn name(&self) -> &'static str {
        "parse"
    }

    fn description(&self) -> &'static str {
        "Parse declaration files into a declaration model"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        info!(files = ctx.declaration_files.len(), "parsing declarations");
        let parsed = ctx
            .toolchain
            .parser
            .parse(&ctx.declaration_files, &ctx.inputs.search_root)
            .wrap_err("failed to parse declaration files")?;
        ctx.add_info(
            self.name(),
            format!(
                "{} declarations, {} instances",
                parsed.declarations.len(),
                parsed.instances.len()
            ),
        );
        ctx.parsed = Some(parsed);
        Ok(())
    }
}
