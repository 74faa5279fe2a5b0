//! Addon merging.
//!
//! An addon is a hand-written source fragment for one generated entity. Its
//! leading block of non-blank lines holds directives (imports) that are
//! hoisted to the top of the generated unit; everything after the first
//! blank line is the body, appended to the entity named by the file stem.

use std::path::{Path, PathBuf};

use eyre::{Context, Result, eyre};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;
use wrapgen_core::entity_key;

/// One addon file split into its two parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddonFile {
    /// Entity the body augments: the file's base name without extension.
    pub key: String,
    /// Leading non-blank lines, each with its line terminator.
    pub directives: Vec<String>,
    /// Everything after the first blank line, verbatim.
    pub body: String,
}

impl AddonFile {
    /// Split `content` read from an addon named `key`.
    pub fn parse(key: impl Into<String>, content: &str) -> Self {
        let mut directives = Vec::new();
        let mut body_start = content.len();
        let mut offset = 0;

        for line in content.split_inclusive('\n') {
            offset += line.len();
            if line.trim().is_empty() {
                body_start = offset;
                break;
            }
            directives.push(line.to_string());
        }

        Self {
            key: key.into(),
            directives,
            body: content[body_start..].to_string(),
        }
    }

    /// Read and split the addon at `path`.
    pub fn read(path: &Path) -> Result<Self> {
        let key = entity_key(path)
            .ok_or_else(|| eyre!("addon path has no file name: {}", path.display()))?;
        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read addon {}", path.display()))?;
        Ok(Self::parse(key, &content))
    }
}

/// Hand-written code per entity, in append order.
///
/// Bodies sharing a key are kept in the order they were added; entries are
/// never reordered or deduplicated. Keys iterate in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ManualCode {
    entries: IndexMap<String, Vec<String>>,
}

impl ManualCode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a code fragment to `key`, creating the entry on first use.
    pub fn add(&mut self, key: impl Into<String>, code: impl Into<String>) {
        self.entries.entry(key.into()).or_default().push(code.into());
    }

    /// Fragments recorded for `key`, in the order they were added.
    pub fn fragments(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// All fragments of `key` joined into one buffer.
    pub fn code(&self, key: &str) -> Option<String> {
        self.entries.get(key).map(|fragments| fragments.concat())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The result of merging all addon files of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergedAddons {
    /// Directive lines from every addon, in file order.
    pub directives: Vec<String>,
    pub manual_code: ManualCode,
    /// The files merged, in processing order.
    pub files: Vec<PathBuf>,
}

/// Merge the addon files at `paths`, in the given order.
pub fn merge_addons(paths: &[PathBuf]) -> Result<MergedAddons> {
    let mut merged = MergedAddons::default();

    for path in paths {
        let addon = AddonFile::read(path)?;
        debug!(
            path = %path.display(),
            key = %addon.key,
            directives = addon.directives.len(),
            "merged addon"
        );
        merged.directives.extend(addon.directives);
        merged.manual_code.add(addon.key, addon.body);
        merged.files.push(path.clone());
    }

    Ok(merged)
}
