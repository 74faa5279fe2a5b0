//! Compiler options and the compile step.

use std::path::{Path, PathBuf};

use eyre::{Context, Result};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;
use wrapgen_core::OptionValue;

use crate::toolchain::Compiler;

/// Language level pinned by the baseline directives.
pub const LANGUAGE_LEVEL: i64 = 3;

/// Options handed to the compiler for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompileOptions {
    /// Directories searched for included declarations, in order.
    pub include_path: Vec<PathBuf>,
    /// Compiler directives, baseline keys first.
    pub directives: IndexMap<String, OptionValue>,
    /// Native C++ interop mode.
    pub cplus: bool,
}

impl CompileOptions {
    /// The fixed baseline every run starts from.
    pub fn baseline() -> Self {
        let mut directives = IndexMap::new();
        // Keeps generated code compatible with older compiler releases.
        directives.insert("binding".to_string(), OptionValue::Bool(false));
        directives.insert("boundscheck".to_string(), OptionValue::Bool(false));
        directives.insert("wraparound".to_string(), OptionValue::Bool(false));
        directives.insert("language_level".to_string(), OptionValue::Int(LANGUAGE_LEVEL));

        Self {
            include_path: Vec::new(),
            directives,
            cplus: true,
        }
    }

    /// Baseline with `include_path`, overridden key by key by `extra`.
    pub fn merged(include_path: Vec<PathBuf>, extra: Option<&ExtraCompileOptions>) -> Self {
        let mut options = Self::baseline();
        options.include_path = include_path;

        if let Some(extra) = extra {
            for (key, value) in &extra.directives {
                options.directives.insert(key.clone(), value.clone());
            }
            if let Some(cplus) = extra.cplus {
                options.cplus = cplus;
            }
        }
        options
    }

    pub fn directive(&self, key: &str) -> Option<&OptionValue> {
        self.directives.get(key)
    }
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self::baseline()
    }
}

/// Caller-supplied overrides of the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtraCompileOptions {
    pub directives: IndexMap<String, OptionValue>,
    pub cplus: Option<bool>,
}

impl ExtraCompileOptions {
    pub fn directive(mut self, key: impl Into<String>, value: impl Into<OptionValue>) -> Self {
        self.directives.insert(key.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty() && self.cplus.is_none()
    }
}

/// Runs the compiler on the generated source.
pub struct CompileDriver<'a> {
    compiler: &'a dyn Compiler,
}

impl<'a> CompileDriver<'a> {
    pub fn new(compiler: &'a dyn Compiler) -> Self {
        Self { compiler }
    }

    /// Compile `target` with the baseline merged with `extra`.
    ///
    /// Compiler failures are returned as is; there is no retry.
    pub fn compile(
        &self,
        target: &Path,
        include_dirs: &[PathBuf],
        extra: Option<&ExtraCompileOptions>,
    ) -> Result<CompileOptions> {
        let options = CompileOptions::merged(include_dirs.to_vec(), extra);
        info!(
            target = %target.display(),
            include_dirs = options.include_path.len(),
            cplus = options.cplus,
            "compiling"
        );
        self.compiler
            .compile(target, &options)
            .wrap_err_with(|| format!("failed to compile {}", target.display()))?;
        Ok(options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingCompiler;

    #[test]
    fn test_baseline() {
        let options = CompileOptions::baseline();
        assert_eq!(options.directive("binding"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.directive("boundscheck"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.directive("wraparound"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.directive("language_level"), Some(&OptionValue::Int(3)));
        assert!(options.cplus);
        assert!(options.include_path.is_empty());
    }

    #[test]
    fn test_extra_overrides_only_named_keys() {
        let extra = ExtraCompileOptions::default().directive("boundscheck", true);

        let options = CompileOptions::merged(vec![], Some(&extra));

        assert_eq!(options.directive("boundscheck"), Some(&OptionValue::Bool(true)));
        assert_eq!(options.directive("wraparound"), Some(&OptionValue::Bool(false)));
        assert_eq!(options.directive("language_level"), Some(&OptionValue::Int(3)));
        assert!(options.cplus);
    }

    #[test]
    fn test_extra_adds_new_keys_and_cplus() {
        let extra = ExtraCompileOptions {
            cplus: Some(false),
            ..Default::default()
        }
        .directive("profile", "on");

        let options = CompileOptions::merged(vec![PathBuf::from("inc")], Some(&extra));

        let keys: Vec<_> = options.directives.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["binding", "boundscheck", "wraparound", "language_level", "profile"]
        );
        assert!(!options.cplus);
        assert_eq!(options.include_path, vec![PathBuf::from("inc")]);
    }

    #[test]
    fn test_driver_hands_merged_options_to_compiler() {
        let compiler = RecordingCompiler::new();
        let extra = ExtraCompileOptions::default().directive("wraparound", true);

        CompileDriver::new(&compiler)
            .compile(
                Path::new("out.pyx"),
                &[PathBuf::from("gen"), PathBuf::from("extra")],
                Some(&extra),
            )
            .unwrap();

        let calls = compiler.calls();
        assert_eq!(calls.len(), 1);
        let (target, options) = &calls[0];
        assert_eq!(target, Path::new("out.pyx"));
        assert_eq!(
            options.include_path,
            vec![PathBuf::from("gen"), PathBuf::from("extra")]
        );
        assert_eq!(options.directive("wraparound"), Some(&OptionValue::Bool(true)));
    }

    #[test]
    fn test_driver_propagates_failure() {
        let compiler = RecordingCompiler::failing("syntax error");

        let err = CompileDriver::new(&compiler)
            .compile(Path::new("out.pyx"), &[], None)
            .unwrap_err();

        assert_eq!(err.to_string(), "failed to compile out.pyx");
        assert_eq!(err.root_cause().to_string(), "syntax error");
    }
}
