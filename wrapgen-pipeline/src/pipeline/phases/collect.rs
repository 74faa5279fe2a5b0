use eyre::Result;
use wrapgen_core::normalize_extension;

use crate::{
    collect::collect,
    pipeline::{BuildContext, BuildError, Phase},
};

/// Resolves declaration and addon inputs into sorted file lists.
///
/// Fails when no declaration file remains; unmatched patterns and files
/// with the wrong extension become warnings.
pub struct CollectPhase;

impl Phase for CollectPhase {
    fn name(&self) -> &'static str {
        "collect"
    }

    fn description(&self) -> &'static str {
        "Resolve input paths, globs and directories into files"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let declaration_ext = normalize_extension(&ctx.inputs.declaration_extension).to_string();
        let source_ext = normalize_extension(&ctx.inputs.source_extension).to_string();

        let declarations = collect(Some(ctx.inputs.declarations.as_slice()), &declaration_ext);
        for warning in declarations.warnings {
            ctx.add_warning(self.name(), warning);
        }
        if declarations.files.is_empty() {
            return Err(BuildError::NoDeclarations {
                extension: declaration_ext,
            }
            .into());
        }

        let addons = collect(Some(ctx.inputs.addons.as_slice()), &source_ext);
        for warning in addons.warnings {
            ctx.add_warning(self.name(), warning);
        }

        ctx.declaration_files = declarations.files;
        ctx.addon_files = addons.files;
        Ok(())
    }
}
