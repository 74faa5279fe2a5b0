//! Converter module loading and registration.
//!
//! Converter modules register custom marshalling for declared types. Each
//! module path is loaded with its parent directory temporarily at the front
//! of the search path, and its `register_converters` entries are added to a
//! shared [`ConverterTable`].

mod error;
mod module;
mod search_path;
mod table;

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info_span};

pub use error::ConverterError;
pub use module::{
    ConverterModule, DeclarativeRegistrar, ENTRY_POINT, ModuleKind, PACKAGE_MARKER, Registrar,
};
pub use search_path::{SearchPath, SearchPathGuard};
pub use table::{ConverterSpec, ConverterTable};

/// Loads converter modules and runs their registrars in order.
#[derive(Default)]
pub struct ConverterRegistry {
    search_path: SearchPath,
    registrars: Vec<Box<dyn Registrar>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from `search_path` instead of an empty one.
    pub fn with_search_path(search_path: SearchPath) -> Self {
        Self {
            search_path,
            registrars: Vec::new(),
        }
    }

    /// Add an in-process registrar; these run before any module path.
    pub fn registrar(mut self, registrar: impl Registrar + 'static) -> Self {
        self.registrars.push(Box::new(registrar));
        self
    }

    pub fn search_path(&self) -> &SearchPath {
        &self.search_path
    }

    /// Run all in-process registrars, then load and register each module in
    /// `paths`, in order.
    ///
    /// The first failing module aborts the whole operation. The search path
    /// is the same afterwards as before, whether or not a module failed.
    pub fn register_all(&mut self, paths: &[PathBuf]) -> Result<ConverterTable, ConverterError> {
        let mut table = ConverterTable::new();

        for registrar in &self.registrars {
            debug!(registrar = registrar.name(), "running in-process registrar");
            registrar.register_converters(&mut table);
        }

        for path in paths {
            register_module(&mut self.search_path, path, &mut table)?;
        }

        Ok(table)
    }
}

fn register_module(
    search_path: &mut SearchPath,
    path: &Path,
    table: &mut ConverterTable,
) -> Result<(), ConverterError> {
    let _span = info_span!("converter", path = %path.display()).entered();

    let absolute = std::path::absolute(path).map_err(|e| {
        ConverterError::import(
            path,
            path.display().to_string(),
            search_path,
            format!("cannot resolve path: {}", e),
        )
    })?;
    let (dir, name) = split_module_path(&normalize(&absolute));

    let guard = search_path.scoped(dir);
    let module = ConverterModule::locate(&name, &guard)?;
    let registrar = module.registrar(path, &guard)?;

    let before = table.len();
    registrar.register_converters(table);
    debug!(
        module = %name,
        converters = registrar.converters().len(),
        new_types = table.len() - before,
        "registered converters"
    );
    Ok(())
}

/// Resolve `.` and `..` components without touching the file system.
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

/// Split an absolute module path into its parent directory and module name.
///
/// The module name is the final component with a trailing `.toml` removed.
fn split_module_path(path: &Path) -> (PathBuf, String) {
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = file_name
        .strip_suffix(".toml")
        .map(str::to_string)
        .unwrap_or(file_name);
    (dir, name)
}
