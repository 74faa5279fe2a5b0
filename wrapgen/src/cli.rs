use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use eyre::Result;
use tracing::debug;
use wrapgen_manifest::{CONFIG_FILE_NAME, Manifest, WrapgenToml};
use wrapgen_pipeline::{BuildError, ConverterError};

use crate::{
    ops::{self, BuildOverrides, StatusPlugin},
    reports::{Report, TerminalOutput},
};

/// Extension trait for exiting on manifest errors with pretty formatting
pub(crate) trait UnwrapOrExit<T> {
    fn unwrap_or_exit(self) -> T;
}

impl<T> UnwrapOrExit<T> for wrapgen_manifest::Result<T> {
    fn unwrap_or_exit(self) -> T {
        match self {
            Ok(v) => v,
            Err(e) => exit_with(*e),
        }
    }
}

fn exit_with(diagnostic: impl miette::Diagnostic + Send + Sync + 'static) -> ! {
    eprintln!("{:?}", miette::Report::new(diagnostic));
    std::process::exit(1);
}

/// Print structured pipeline errors with miette and exit; hand anything
/// else back to the caller.
fn exit_on_diagnostic(err: eyre::Report) -> eyre::Report {
    let err = match err.downcast::<BuildError>() {
        Ok(e) => exit_with(e),
        Err(err) => err,
    };
    match err.downcast::<ConverterError>() {
        Ok(e) => exit_with(e),
        Err(err) => err,
    }
}

#[derive(Parser)]
#[command(name = "wrapgen")]
#[command(version)]
#[command(
    about = "Merge declaration files, addons and type converters into one wrapper source, \
             then compile it"
)]
pub(crate) struct Cli {
    /// Addon file, directory or glob pattern (repeatable)
    #[arg(long = "addons", value_name = "ADDON")]
    addons: Vec<String>,

    /// Converter module path (repeatable; registered in order)
    #[arg(long = "converters", value_name = "CONVERTER")]
    converters: Vec<PathBuf>,

    /// Generated source file
    #[arg(long, value_name = "FILE")]
    out: Option<PathBuf>,

    /// Path to wrapgen.toml (defaults to ./wrapgen.toml when present)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Declaration files, directories or glob patterns
    #[arg(value_name = "DECLARATIONS")]
    declarations: Vec<String>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let manifest = self.manifest();
        let overrides = BuildOverrides {
            declarations: self.declarations,
            addons: self.addons,
            converters: self.converters,
            out: self.out,
        };

        let inputs = ops::resolve_inputs(&manifest, overrides)?;
        let toolchain = ops::toolchain(&manifest);

        let report =
            ops::build(inputs, toolchain, Some(StatusPlugin)).map_err(exit_on_diagnostic)?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn manifest(&self) -> Manifest {
        let file = match &self.config {
            Some(path) => Some(WrapgenToml::open(path).unwrap_or_exit()),
            None => WrapgenToml::open_or_default(Path::new(CONFIG_FILE_NAME)).unwrap_or_exit(),
        };

        match file {
            Some(file) => {
                debug!(path = %file.path().display(), "loaded configuration");
                file.into_manifest()
            }
            None => {
                debug!("no configuration file, using defaults");
                Manifest::default()
            }
        }
    }
}
