//! Manifest parsing from files and strings.

use std::str::FromStr;

use wrapgen_core::Version;

use super::{CONFIG_FILE_NAME, Manifest};
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, CONFIG_FILE_NAME)
    }
}

impl Manifest {
    /// Parse a wrapgen.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if let Some(required) = &manifest.build.requires {
        let current = Version::current();
        if *required > current {
            return Err(ctx.unsupported_version(required.clone(), current));
        }
    }

    let commands = [
        ("parser", &manifest.parser.command),
        ("generator", &manifest.generator.command),
        ("compiler", &manifest.compiler.command),
    ];
    for (table, command) in commands {
        if command.trim().is_empty() {
            return Err(ctx.validation_error(
                "command",
                format!("{} command must not be empty", table),
            ));
        }
    }

    if manifest.build.declaration_ext().is_empty() {
        return Err(ctx.validation_error(
            "declaration_extension",
            "declaration_extension must not be empty",
        ));
    }
    if manifest.build.source_ext().is_empty() {
        return Err(ctx.validation_error(
            "source_extension",
            "source_extension must not be empty",
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use wrapgen_core::OptionValue;

    use super::*;

    #[test]
    fn test_empty_manifest_uses_defaults() {
        let manifest = Manifest::from_str("").unwrap();
        assert!(manifest.build.out.is_none());
        assert_eq!(manifest.build.search_root, Path::new("."));
        assert_eq!(manifest.build.declaration_ext(), "pxd");
        assert_eq!(manifest.build.source_ext(), "pyx");
        assert_eq!(manifest.parser.command, "wrapgen-parser");
        assert_eq!(manifest.generator.command, "wrapgen-generator");
        assert!(manifest.generator.include_boost);
        assert_eq!(manifest.compiler.command, "cython");
        assert!(manifest.compiler.directives.is_empty());
    }

    #[test]
    fn test_full_manifest() {
        let manifest = Manifest::from_str(
            r#"
            [build]
            out = "wrapped.pyx"
            declarations = ["pxds/*.pxd"]
            addons = ["addons"]
            converters = ["converters/numpy"]
            include_dirs = ["include"]
            declaration_extension = ".pxd"

            [generator]
            include_boost = false

            [compiler]
            command = "cython3"
            args = ["--fast-fail"]
            cplus = false

            [compiler.directives]
            boundscheck = true
            language_level = 2
            "#,
        )
        .unwrap();

        assert_eq!(manifest.build.declarations, vec!["pxds/*.pxd"]);
        assert_eq!(manifest.build.addons, vec!["addons"]);
        assert_eq!(manifest.build.declaration_ext(), "pxd");
        assert!(!manifest.generator.include_boost);
        assert_eq!(manifest.compiler.command, "cython3");
        assert_eq!(manifest.compiler.cplus, Some(false));
        assert_eq!(
            manifest.compiler.directives.get("boundscheck"),
            Some(&OptionValue::Bool(true))
        );
        assert_eq!(
            manifest.compiler.directives.get("language_level"),
            Some(&OptionValue::Int(2))
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = Manifest::from_str("[build]\noutput = \"x.pyx\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_empty_command_rejected() {
        let err = Manifest::from_str("[compiler]\ncommand = \"  \"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
        assert_eq!(err.to_string(), "compiler command must not be empty");
    }

    #[test]
    fn test_empty_extension_rejected() {
        let err = Manifest::from_str("[build]\nsource_extension = \".\"\n").unwrap_err();
        assert_eq!(err.to_string(), "source_extension must not be empty");
    }

    #[test]
    fn test_requires_newer_version_rejected() {
        let err = Manifest::from_str("[build]\nrequires = \"999.0.0\"\n").unwrap_err();
        assert!(matches!(*err, Error::UnsupportedVersion { .. }));
    }

    #[test]
    fn test_requires_current_version_accepted() {
        let src = format!("[build]\nrequires = \"{}\"\n", Version::current());
        assert!(Manifest::from_str(&src).is_ok());
    }

    #[test]
    fn test_invalid_requires_is_parse_error() {
        let err = Manifest::from_str("[build]\nrequires = \"one\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
