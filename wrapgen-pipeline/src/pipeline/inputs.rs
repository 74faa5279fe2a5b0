use std::path::PathBuf;

use crate::{compile::ExtraCompileOptions, toolchain::DeclarationModel};

/// Everything a caller supplies for one build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildInputs {
    /// Declaration files, directories or glob patterns.
    pub declarations: Vec<String>,
    /// Addon files, directories or glob patterns.
    pub addons: Vec<String>,
    /// Converter module paths, in registration order.
    pub converters: Vec<PathBuf>,
    /// The generated source file.
    pub out: PathBuf,
    pub declaration_extension: String,
    pub source_extension: String,
    /// Appended after the include directories the generator reports.
    pub include_dirs: Vec<PathBuf>,
    pub extra_options: Option<ExtraCompileOptions>,
    /// Root the parser resolves declaration references against.
    pub search_root: PathBuf,
    pub include_boost: bool,
    pub all_declarations: DeclarationModel,
    /// Directories searched for converter modules after each module's own.
    pub converter_path: Vec<PathBuf>,
}

impl BuildInputs {
    pub fn new(out: impl Into<PathBuf>) -> Self {
        Self {
            declarations: Vec::new(),
            addons: Vec::new(),
            converters: Vec::new(),
            out: out.into(),
            declaration_extension: "pxd".to_string(),
            source_extension: "pyx".to_string(),
            include_dirs: Vec::new(),
            extra_options: None,
            search_root: PathBuf::from("."),
            include_boost: true,
            all_declarations: DeclarationModel::new(),
            converter_path: Vec::new(),
        }
    }

    pub fn declarations<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.declarations.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn addons<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.addons.extend(items.into_iter().map(Into::into));
        self
    }

    pub fn converters<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.converters.extend(paths.into_iter().map(Into::into));
        self
    }
}
