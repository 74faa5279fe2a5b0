use std::path::PathBuf;

use serde::Deserialize;
use wrapgen_core::{Version, normalize_extension};

/// The `[build]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Minimum wrapgen version this project needs.
    pub requires: Option<Version>,

    /// Generated source file.
    pub out: Option<PathBuf>,

    /// Declaration inputs: files, directories or glob patterns.
    #[serde(default)]
    pub declarations: Vec<String>,

    /// Addon inputs: files, directories or glob patterns.
    #[serde(default)]
    pub addons: Vec<String>,

    /// Converter modules, in registration order.
    #[serde(default)]
    pub converters: Vec<PathBuf>,

    /// Extra include directories appended after those the generator reports.
    #[serde(default)]
    pub include_dirs: Vec<PathBuf>,

    /// Root directory handed to the declaration parser.
    #[serde(default = "default_search_root")]
    pub search_root: PathBuf,

    #[serde(default = "default_declaration_extension")]
    pub declaration_extension: String,

    #[serde(default = "default_source_extension")]
    pub source_extension: String,

    /// Directories always searched for converter modules, after the
    /// module's own directory.
    #[serde(default)]
    pub converter_path: Vec<PathBuf>,
}

fn default_search_root() -> PathBuf {
    PathBuf::from(".")
}

fn default_declaration_extension() -> String {
    "pxd".to_string()
}

fn default_source_extension() -> String {
    "pyx".to_string()
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            requires: None,
            out: None,
            declarations: Vec::new(),
            addons: Vec::new(),
            converters: Vec::new(),
            include_dirs: Vec::new(),
            search_root: default_search_root(),
            declaration_extension: default_declaration_extension(),
            source_extension: default_source_extension(),
            converter_path: Vec::new(),
        }
    }
}

impl BuildConfig {
    /// Declaration file extension without the leading dot.
    pub fn declaration_ext(&self) -> &str {
        normalize_extension(&self.declaration_extension)
    }

    /// Generated/addon source extension without the leading dot.
    pub fn source_ext(&self) -> &str {
        normalize_extension(&self.source_extension)
    }
}
