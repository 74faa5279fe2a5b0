//! Converter modules and the registration entry point.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, trace};

use super::{ConverterError, ConverterSpec, ConverterTable, SearchPath};

/// The table key every converter module must define.
pub const ENTRY_POINT: &str = "register_converters";

/// File that turns a directory into a converter package.
pub const PACKAGE_MARKER: &str = "converters.toml";

/// Something that can fill a [`ConverterTable`].
///
/// File-based modules yield a [`DeclarativeRegistrar`]; library users can
/// implement this trait to register converters in process.
pub trait Registrar {
    /// Name used in logs and as the owner of registered converters.
    fn name(&self) -> &str;

    /// Add this registrar's converters to `table`.
    fn register_converters(&self, table: &mut ConverterTable);
}

/// How a module was found on the search path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// A single `<name>.toml` document.
    File,
    /// A `<name>/` directory with a package marker.
    Package,
}

/// A converter module located and parsed, not yet registered.
#[derive(Debug, Clone)]
pub struct ConverterModule {
    name: String,
    kind: ModuleKind,
    file: PathBuf,
    document: toml::Table,
}

impl ConverterModule {
    /// Find the module `name` along `search_path` and parse it.
    ///
    /// Directories are searched front to back. Within one directory a
    /// single-file module wins over a package of the same name.
    pub fn locate(name: &str, search_path: &SearchPath) -> Result<Self, ConverterError> {
        let tried = search_path
            .dirs()
            .first()
            .cloned()
            .unwrap_or_default();

        if name.is_empty() {
            return Err(ConverterError::import(
                tried,
                name,
                search_path,
                "empty module name",
            ));
        }

        let mut unmarked = None;
        for dir in search_path.iter() {
            let file = dir.join(format!("{}.toml", name));
            if file.is_file() {
                return Self::load(name, ModuleKind::File, file, search_path);
            }

            let package = dir.join(name);
            if package.is_dir() {
                let marker = package.join(PACKAGE_MARKER);
                if marker.is_file() {
                    return Self::load(name, ModuleKind::Package, marker, search_path);
                }
                trace!(dir = %package.display(), "directory without package marker");
                if unmarked.is_none() {
                    unmarked = Some(package);
                }
            }
        }

        let reason = match unmarked {
            Some(dir) => format!(
                "directory {} has no {} marker",
                dir.display(),
                PACKAGE_MARKER
            ),
            None => format!("no module named '{}' on search path {}", name, search_path),
        };
        Err(ConverterError::import(tried, name, search_path, reason))
    }

    fn load(
        name: &str,
        kind: ModuleKind,
        file: PathBuf,
        search_path: &SearchPath,
    ) -> Result<Self, ConverterError> {
        let tried = file.parent().map(Path::to_path_buf).unwrap_or_default();
        let content = fs::read_to_string(&file).map_err(|e| {
            ConverterError::import(
                tried.clone(),
                name,
                search_path,
                format!("cannot read {}: {}", file.display(), e),
            )
        })?;
        let document: toml::Table = content.parse().map_err(|e: toml::de::Error| {
            ConverterError::import(
                tried.clone(),
                name,
                search_path,
                format!("malformed {}: {}", file.display(), e.message()),
            )
        })?;

        debug!(module = name, file = %file.display(), ?kind, "loaded converter module");
        Ok(Self {
            name: name.to_string(),
            kind,
            file,
            document,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ModuleKind {
        self.kind
    }

    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Top-level keys defined by the module.
    pub fn keys(&self) -> Vec<String> {
        self.document.keys().cloned().collect()
    }

    /// Directory holding the module document.
    pub fn dir(&self) -> &Path {
        self.file.parent().unwrap_or(Path::new("."))
    }

    /// Resolve the registration entry point into a registrar.
    ///
    /// `requested` is the path the caller asked for; it names the module in
    /// errors.
    pub fn registrar(
        &self,
        requested: &Path,
        search_path: &SearchPath,
    ) -> Result<DeclarativeRegistrar, ConverterError> {
        let Some(entry) = self.document.get(ENTRY_POINT) else {
            return Err(ConverterError::missing_entry_point(
                requested.to_path_buf(),
                self.file.clone(),
                search_path,
                list_dir(self.dir()),
                self.keys(),
            ));
        };

        let invalid = |reason: String| ConverterError::InvalidEntryPoint {
            path: requested.to_path_buf(),
            reason,
        };

        let entries = entry
            .as_array()
            .ok_or_else(|| invalid(format!("expected an array, found {}", entry.type_str())))?;

        let mut converters = Vec::with_capacity(entries.len());
        for (index, entry) in entries.iter().enumerate() {
            let table = entry.as_table().ok_or_else(|| {
                invalid(format!(
                    "entry {} is {}, expected a table",
                    index,
                    entry.type_str()
                ))
            })?;
            let mut settings = table.clone();
            let type_name = match settings.remove("type_name") {
                Some(toml::Value::String(name)) if !name.trim().is_empty() => name,
                Some(_) => {
                    return Err(invalid(format!(
                        "entry {} has a 'type_name' that is not a non-empty string",
                        index
                    )));
                }
                None => return Err(invalid(format!("entry {} has no 'type_name'", index))),
            };
            converters.push(ConverterSpec {
                type_name,
                module: self.name.clone(),
                settings,
            });
        }

        Ok(DeclarativeRegistrar {
            name: self.name.clone(),
            converters,
        })
    }
}

/// Registrar backed by the `register_converters` array of a module.
#[derive(Debug, Clone)]
pub struct DeclarativeRegistrar {
    name: String,
    converters: Vec<ConverterSpec>,
}

impl DeclarativeRegistrar {
    pub fn converters(&self) -> &[ConverterSpec] {
        &self.converters
    }
}

impl Registrar for DeclarativeRegistrar {
    fn name(&self) -> &str {
        &self.name
    }

    fn register_converters(&self, table: &mut ConverterTable) {
        for spec in &self.converters {
            table.register(spec.clone());
        }
    }
}

fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.file_name().to_string_lossy().into_owned())
                .collect()
        })
        .unwrap_or_default();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_locate_file_module() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("numpy.toml"),
            "[[register_converters]]\ntype_name = \"Matrix\"\ndtype = \"double\"\n",
        )
        .unwrap();
        let search_path = SearchPath::new([temp.path()]);

        let module = ConverterModule::locate("numpy", &search_path).unwrap();
        let registrar = module
            .registrar(Path::new("numpy"), &search_path)
            .unwrap();

        assert_eq!(module.kind(), ModuleKind::File);
        assert_eq!(registrar.name(), "numpy");
        let spec = &registrar.converters()[0];
        assert_eq!(spec.type_name, "Matrix");
        assert_eq!(spec.settings.get("dtype").and_then(|v| v.as_str()), Some("double"));
        assert!(!spec.settings.contains_key("type_name"));
    }

    #[test]
    fn test_locate_package_module() {
        let temp = TempDir::new().unwrap();
        let package = temp.path().join("linalg");
        fs::create_dir(&package).unwrap();
        fs::write(
            package.join(PACKAGE_MARKER),
            "register_converters = [{ type_name = \"Vector\" }]\n",
        )
        .unwrap();

        let module = ConverterModule::locate("linalg", &SearchPath::new([temp.path()])).unwrap();

        assert_eq!(module.kind(), ModuleKind::Package);
        assert_eq!(module.file(), package.join(PACKAGE_MARKER));
    }

    #[test]
    fn test_directory_without_marker_is_import_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("linalg")).unwrap();

        let err = ConverterModule::locate("linalg", &SearchPath::new([temp.path()])).unwrap_err();

        match err {
            ConverterError::Import { module, reason, .. } => {
                assert_eq!(module, "linalg");
                assert!(reason.contains("converters.toml"));
            }
            other => panic!("expected import error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_module_is_import_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("broken.toml"), "register_converters = [").unwrap();

        let err = ConverterModule::locate("broken", &SearchPath::new([temp.path()])).unwrap_err();

        assert!(matches!(err, ConverterError::Import { .. }));
        assert!(err.to_string().contains("malformed"));
    }

    #[test]
    fn test_missing_entry_point_carries_context() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("empty.toml"), "name = \"empty\"\n").unwrap();
        let search_path = SearchPath::new([temp.path()]);
        let module = ConverterModule::locate("empty", &search_path).unwrap();

        let err = module
            .registrar(Path::new("converters/empty"), &search_path)
            .unwrap_err();

        assert_eq!(err.to_string(), "no register_converters in converters/empty");
        match err {
            ConverterError::MissingEntryPoint { listing, keys, .. } => {
                assert_eq!(listing, vec!["empty.toml"]);
                assert_eq!(keys, vec!["name"]);
            }
            other => panic!("expected missing entry point, got {other:?}"),
        }
    }

    #[test]
    fn test_entry_without_type_name_is_invalid() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("bad.toml"),
            "[[register_converters]]\ndtype = \"int\"\n",
        )
        .unwrap();
        let search_path = SearchPath::new([temp.path()]);
        let module = ConverterModule::locate("bad", &search_path).unwrap();

        let err = module.registrar(Path::new("bad"), &search_path).unwrap_err();

        assert!(matches!(err, ConverterError::InvalidEntryPoint { .. }));
        assert!(err.to_string().contains("entry 0 has no 'type_name'"));
    }
}
