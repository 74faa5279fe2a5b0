//! Module search path with scoped entries.

use std::{
    fmt,
    ops::Deref,
    path::{Path, PathBuf},
};

/// Ordered directories consulted when locating converter modules.
///
/// The front entry is searched first. Temporary entries are added with
/// [`SearchPath::scoped`], which hands out a guard that retracts the entry
/// when dropped, so the path after a load equals the path before it on
/// every exit path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Append a directory at the back (lowest priority).
    pub fn append(&mut self, dir: impl Into<PathBuf>) {
        self.dirs.push(dir.into());
    }

    /// Put `dir` at the front until the returned guard is dropped.
    pub fn scoped(&mut self, dir: impl Into<PathBuf>) -> SearchPathGuard<'_> {
        self.dirs.insert(0, dir.into());
        SearchPathGuard { path: self }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.dirs.iter().map(PathBuf::as_path)
    }
}

impl fmt::Display for SearchPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, dir) in self.dirs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", dir.display())?;
        }
        write!(f, "]")
    }
}

/// A temporary front entry of a [`SearchPath`].
///
/// Exactly one entry is removed from the front when the guard drops.
#[derive(Debug)]
pub struct SearchPathGuard<'a> {
    path: &'a mut SearchPath,
}

impl SearchPathGuard<'_> {
    /// The directory this guard added.
    pub fn dir(&self) -> &Path {
        // The guard's entry stays at the front for its whole lifetime.
        &self.path.dirs[0]
    }
}

impl Deref for SearchPathGuard<'_> {
    type Target = SearchPath;

    fn deref(&self) -> &SearchPath {
        self.path
    }
}

impl Drop for SearchPathGuard<'_> {
    fn drop(&mut self) {
        if !self.path.dirs.is_empty() {
            self.path.dirs.remove(0);
        }
    }
}
