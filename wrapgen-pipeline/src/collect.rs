//! Input file collection.
//!
//! Turns a user-supplied list of files, directories and glob patterns into
//! the canonical, sorted file list every later stage processes in order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use glob::MatchOptions;
use tracing::debug;
use wrapgen_core::{has_extension, normalize_extension};

/// Files resolved from one input list, plus the warnings raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectedFiles {
    /// Sorted, unique paths carrying the requested extension.
    pub files: Vec<PathBuf>,
    /// Non-fatal problems: unmatched patterns and ignored files.
    pub warnings: Vec<String>,
}

impl CollectedFiles {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }
}

/// Resolve `items` into the files carrying `extension`.
///
/// Directories contribute their immediate children; every other item is
/// expanded as a glob pattern. The union is deduplicated and sorted
/// byte-wise, then filtered by extension. Nothing here is fatal: patterns
/// matching nothing and files with the wrong extension only produce
/// warnings, and `None` yields an empty result.
pub fn collect(items: Option<&[String]>, extension: &str) -> CollectedFiles {
    let mut result = CollectedFiles::default();
    let Some(items) = items else {
        return result;
    };

    let mut candidates: Vec<PathBuf> = Vec::new();
    for item in items {
        let path = Path::new(item);
        if path.is_dir() {
            list_directory(path, &mut candidates, &mut result.warnings);
        } else {
            let found = expand_pattern(item, &mut result.warnings);
            if found.is_empty() {
                result
                    .warnings
                    .push(format!("'{}' did not match any file", item));
            } else {
                candidates.extend(found);
            }
        }
    }

    sort_unique(&mut candidates);

    let extension = normalize_extension(extension);
    for candidate in candidates {
        if has_extension(&candidate, extension) {
            result.files.push(candidate);
        } else {
            result
                .warnings
                .push(format!("ignoring {}", candidate.display()));
        }
    }

    debug!(
        extension,
        files = result.files.len(),
        warnings = result.warnings.len(),
        "collected input files"
    );
    result
}

/// Byte-wise sort and dedup on the same key.
fn sort_unique(paths: &mut Vec<PathBuf>) {
    paths.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
    paths.dedup_by(|a, b| a.as_os_str() == b.as_os_str());
}

fn list_directory(dir: &Path, candidates: &mut Vec<PathBuf>, warnings: &mut Vec<String>) {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(format!("cannot read directory {}: {}", dir.display(), e));
            return;
        }
    };

    for entry in entries {
        match entry {
            Ok(entry) => candidates.push(dir.join(entry.file_name())),
            Err(e) => warnings.push(format!("cannot read entry in {}: {}", dir.display(), e)),
        }
    }
}

fn expand_pattern(pattern: &str, warnings: &mut Vec<String>) -> Vec<PathBuf> {
    // Wildcards never match a leading dot; directory listings keep hidden files.
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let Ok(paths) = glob::glob_with(pattern, options) else {
        debug!(pattern, "invalid glob pattern");
        return Vec::new();
    };

    let mut found = Vec::new();
    for entry in paths {
        match entry {
            Ok(path) => found.push(path),
            Err(e) => warnings.push(format!("cannot read {}: {}", e.path().display(), e.error())),
        }
    }
    found
}
