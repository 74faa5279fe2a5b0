use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use super::SearchPath;

#[derive(Debug, Error, Diagnostic)]
pub enum ConverterError {
    #[error("cannot import converter module '{module}' from {}: {reason}", .tried.display())]
    #[diagnostic(
        code(wrapgen::converter_import),
        help(
            "a converter module is '<name>.toml' or a directory '<name>/' holding a \
             'converters.toml' package marker; maybe the marker file is missing"
        )
    )]
    Import {
        /// Directory tried first.
        tried: PathBuf,
        module: String,
        search_path: SearchPath,
        reason: String,
    },

    #[error("no register_converters in {}", .path.display())]
    #[diagnostic(code(wrapgen::missing_entry_point))]
    MissingEntryPoint {
        /// The path as supplied by the caller.
        path: PathBuf,
        /// The document that was loaded.
        file: PathBuf,
        search_path: SearchPath,
        /// Entries of the module's directory.
        listing: Vec<String>,
        /// Top-level keys the module does define.
        keys: Vec<String>,
        #[help]
        context: String,
    },

    #[error("invalid register_converters in {}: {reason}", .path.display())]
    #[diagnostic(
        code(wrapgen::invalid_entry_point),
        help("register_converters must be an array of tables, each with a 'type_name' string")
    )]
    InvalidEntryPoint { path: PathBuf, reason: String },
}

impl ConverterError {
    pub(crate) fn import(
        tried: impl Into<PathBuf>,
        module: impl Into<String>,
        search_path: &SearchPath,
        reason: impl Into<String>,
    ) -> Self {
        Self::Import {
            tried: tried.into(),
            module: module.into(),
            search_path: search_path.clone(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_entry_point(
        path: PathBuf,
        file: PathBuf,
        search_path: &SearchPath,
        listing: Vec<String>,
        keys: Vec<String>,
    ) -> Self {
        let context = format!(
            "search path = {}\nmodule file = {}\nmodule directory = [{}]\nmodule keys = [{}]",
            search_path,
            file.display(),
            listing.join(", "),
            keys.join(", "),
        );
        Self::MissingEntryPoint {
            path,
            file,
            search_path: search_path.clone(),
            listing,
            keys,
            context,
        }
    }
}
