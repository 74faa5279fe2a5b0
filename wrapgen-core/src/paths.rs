//! File-name helpers.

use std::path::Path;

/// Strip surrounding whitespace and a leading dot from an extension.
///
/// ```
/// use wrapgen_core::normalize_extension;
///
/// assert_eq!(normalize_extension(".pxd"), "pxd");
/// assert_eq!(normalize_extension("pyx"), "pyx");
/// ```
pub fn normalize_extension(ext: &str) -> &str {
    let ext = ext.trim();
    ext.strip_prefix('.').unwrap_or(ext)
}

/// Check that `path` carries exactly the extension `ext` (case-sensitive).
///
/// `ext` may be given with or without its leading dot. A path without an
/// extension only matches an empty `ext`.
pub fn has_extension(path: &Path, ext: &str) -> bool {
    let wanted = normalize_extension(ext);
    match path.extension() {
        Some(actual) => actual.to_str() == Some(wanted),
        None => wanted.is_empty(),
    }
}

/// The entity key of a file: its base name without the extension.
pub fn entity_key(path: &Path) -> Option<String> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a/b/Foo.pxd"), "pxd"));
        assert!(has_extension(Path::new("Foo.pxd"), ".pxd"));
        assert!(!has_extension(Path::new("Foo.PXD"), "pxd"));
        assert!(!has_extension(Path::new("Foo.pxd.bak"), "pxd"));
        assert!(!has_extension(Path::new("Foo"), "pxd"));
        assert!(has_extension(Path::new("Foo"), ""));
    }

    #[test]
    fn test_entity_key() {
        assert_eq!(
            entity_key(&PathBuf::from("addons/Matrix.pyx")).as_deref(),
            Some("Matrix")
        );
        assert_eq!(entity_key(Path::new("x.tar.gz")).as_deref(), Some("x.tar"));
        assert_eq!(entity_key(Path::new("/")), None);
    }
}
