//! Hooks around pipeline phases.

use eyre::Result;

use super::BuildContext;

/// Receives callbacks before and after each phase.
///
/// The binary uses this to print the status summary once inputs are
/// collected, before anything is parsed.
pub trait Plugin {
    fn name(&self) -> &'static str;

    /// Called before a phase runs. Return an error to abort the run.
    #[allow(unused_variables)]
    fn on_before_phase(&self, phase: &str, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called after a phase completed. Return an error to abort the run.
    #[allow(unused_variables)]
    fn on_after_phase(&self, phase: &str, ctx: &mut BuildContext) -> Result<()> {
        Ok(())
    }

    /// Called when a phase failed, before the error is returned.
    #[allow(unused_variables)]
    fn on_phase_failed(&self, phase: &str, ctx: &BuildContext) {}
}
