//! Report data structures for the build.
//!
//! Operations build reports, then render them to an [`Output`] target.

mod build;
mod output;
mod status;

pub use build::BuildReport;
pub use output::{Output, Report, TerminalOutput};
pub use status::StatusReport;
