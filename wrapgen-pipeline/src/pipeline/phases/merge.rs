use eyre::Result;

use crate::{
    addons::merge_addons,
    pipeline::{BuildContext, Phase},
};

/// Splits addon files into directives and per-entity manual code.
pub struct MergePhase;

impl Phase for MergePhase {
    fn name(&self) -> &'static str {
        "merge"
    }

    fn description(&self) -> &'static str {
        "Merge addon files into directives and manual code"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        ctx.addons = Some(merge_addons(&ctx.addon_files)?);
        Ok(())
    }
}
