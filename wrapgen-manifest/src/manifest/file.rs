use std::path::{Path, PathBuf};

use super::Manifest;
use crate::Result;

/// A wrapgen.toml file with both raw content and parsed manifest.
#[derive(Debug)]
pub struct WrapgenToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl WrapgenToml {
    /// Open and parse a wrapgen.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(crate::Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Open `path` if it exists, otherwise fall back to the defaults.
    pub fn open_or_default(path: impl AsRef<Path>) -> Result<Option<Self>> {
        let path = path.as_ref();
        if path.exists() {
            Self::open(path).map(Some)
        } else {
            Ok(None)
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;
    use crate::Error;

    #[test]
    fn test_open_reads_manifest() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("wrapgen.toml");
        fs::write(&path, "[build]\nout = \"lib.pyx\"\n").unwrap();

        let file = WrapgenToml::open(&path).unwrap();
        assert_eq!(file.path(), path);
        assert!(file.content().contains("lib.pyx"));
        assert_eq!(
            file.manifest().build.out.as_deref(),
            Some(Path::new("lib.pyx"))
        );
    }

    #[test]
    fn test_open_missing_file_is_io_error() {
        let temp = TempDir::new().unwrap();
        let err = WrapgenToml::open(temp.path().join("nope.toml")).unwrap_err();
        assert!(matches!(*err, Error::Io { .. }));
    }

    #[test]
    fn test_open_or_default_without_file() {
        let temp = TempDir::new().unwrap();
        let file = WrapgenToml::open_or_default(temp.path().join("wrapgen.toml")).unwrap();
        assert!(file.is_none());
    }
}
