//! The converter lookup table filled by registrars.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// One converter as registered by a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConverterSpec {
    /// The declared type the converter marshals.
    pub type_name: String,
    /// Name of the module that registered it.
    pub module: String,
    /// Free-form settings passed through to the code generator.
    pub settings: toml::Table,
}

impl ConverterSpec {
    pub fn new(type_name: impl Into<String>, module: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            module: module.into(),
            settings: toml::Table::new(),
        }
    }

    pub fn with_setting(mut self, key: impl Into<String>, value: impl Into<toml::Value>) -> Self {
        self.settings.insert(key.into(), value.into());
        self
    }
}

/// Converters keyed by type name.
///
/// Registering a type name that is already present replaces the earlier
/// converter; the entry keeps its original position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConverterTable {
    converters: IndexMap<String, ConverterSpec>,
}

impl ConverterTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `spec`, returning the converter it shadows, if any.
    pub fn register(&mut self, spec: ConverterSpec) -> Option<ConverterSpec> {
        let shadowed = self.converters.insert(spec.type_name.clone(), spec);
        if let Some(previous) = &shadowed {
            debug!(
                type_name = %previous.type_name,
                module = %previous.module,
                "converter shadowed"
            );
        }
        shadowed
    }

    pub fn get(&self, type_name: &str) -> Option<&ConverterSpec> {
        self.converters.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.converters.contains_key(type_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConverterSpec> {
        self.converters.values()
    }

    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }
}
