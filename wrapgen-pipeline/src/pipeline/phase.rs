//! Pipeline phase trait.

use eyre::Result;

use super::BuildContext;

/// A step of the build.
///
/// Phases run in order over a shared [`BuildContext`]. A phase returns an
/// error to stop the run; soft problems are recorded as diagnostics instead.
pub trait Phase {
    /// The name of this phase (used in diagnostics, logs and plugin hooks).
    fn name(&self) -> &'static str;

    /// A human-readable description of what this phase does.
    fn description(&self) -> &'static str;

    fn run(&self, ctx: &mut BuildContext) -> Result<()>;
}
