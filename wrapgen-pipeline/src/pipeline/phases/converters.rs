use eyre::Result;

use crate::{
    converters::{ConverterRegistry, SearchPath},
    pipeline::{BuildContext, Phase},
};

/// Loads converter modules and registers them into one table.
pub struct ConvertersPhase;

impl Phase for ConvertersPhase {
    fn name(&self) -> &'static str {
        "converters"
    }

    fn description(&self) -> &'static str {
        "Load converter modules and register their converters"
    }

    fn run(&self, ctx: &mut BuildContext) -> Result<()> {
        let search_path = SearchPath::new(ctx.inputs.converter_path.iter().cloned());
        let mut registry = ConverterRegistry::with_search_path(search_path);
        let table = registry.register_all(&ctx.inputs.converters)?;

        ctx.add_info(
            self.name(),
            format!(
                "{} converters from {} modules",
                table.len(),
                ctx.inputs.converters.len()
            ),
        );
        ctx.converters = Some(table);
        Ok(())
    }
}
