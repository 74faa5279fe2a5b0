//! Built-in pipeline phases, in execution order:
//!
//! - [`CollectPhase`] - resolve declaration and addon inputs into files
//! - [`ParsePhase`] - hand declaration files to the parser
//! - [`MergePhase`] - split and merge addon files
//! - [`ConvertersPhase`] - load converter modules into a table
//! - [`GeneratePhase`] - build the request and run the generator
//! - [`CompilePhase`] - run the compiler on the generated source

mod collect;
mod compile;
mod converters;
mod generate;
mod merge;
mod parse;

pub use collect::CollectPhase;
pub use compile::CompilePhase;
pub use converters::ConvertersPhase;
pub use generate::GeneratePhase;
pub use merge::MergePhase;
pub use parse::ParsePhase;
