//! In-memory collaborators for tests.
//!
//! Each fake records what it was asked to do. Clones share their records,
//! so a test can move one clone into a [`Toolchain`] and inspect another.

use std::{
    cell::RefCell,
    path::{Path, PathBuf},
    rc::Rc,
};

use eyre::{Result, eyre};

use crate::{
    compile::CompileOptions,
    generation::GenerationRequest,
    toolchain::{CodeGenerator, Compiler, DeclarationParser, ParsedDeclarations, Toolchain},
};

/// Parser returning a fixed model.
#[derive(Debug, Clone, Default)]
pub struct StaticParser {
    parsed: ParsedDeclarations,
    calls: Rc<RefCell<Vec<(Vec<PathBuf>, PathBuf)>>>,
}

impl StaticParser {
    pub fn new(parsed: ParsedDeclarations) -> Self {
        Self {
            parsed,
            calls: Rc::default(),
        }
    }

    /// Files and search root of every call, in order.
    pub fn calls(&self) -> Vec<(Vec<PathBuf>, PathBuf)> {
        self.calls.borrow().clone()
    }
}

impl DeclarationParser for StaticParser {
    fn parse(&self, files: &[PathBuf], search_root: &Path) -> Result<ParsedDeclarations> {
        self.calls
            .borrow_mut()
            .push((files.to_vec(), search_root.to_path_buf()));
        Ok(self.parsed.clone())
    }
}

/// Generator that records requests and reports fixed include dirs.
#[derive(Debug, Clone, Default)]
pub struct RecordingGenerator {
    include_dirs: Vec<PathBuf>,
    failure: Option<String>,
    requests: Rc<RefCell<Vec<GenerationRequest>>>,
}

impl RecordingGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reporting(include_dirs: Vec<PathBuf>) -> Self {
        Self {
            include_dirs,
            ..Self::default()
        }
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.borrow().clone()
    }
}

impl CodeGenerator for RecordingGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<PathBuf>> {
        self.requests.borrow_mut().push(request.clone());
        match &self.failure {
            Some(message) => Err(eyre!("{}", message)),
            None => Ok(self.include_dirs.clone()),
        }
    }
}

/// Compiler that records its invocations.
#[derive(Debug, Clone, Default)]
pub struct RecordingCompiler {
    failure: Option<String>,
    calls: Rc<RefCell<Vec<(PathBuf, CompileOptions)>>>,
}

impl RecordingCompiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<(PathBuf, CompileOptions)> {
        self.calls.borrow().clone()
    }
}

impl Compiler for RecordingCompiler {
    fn compile(&self, target: &Path, options: &CompileOptions) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((target.to_path_buf(), options.clone()));
        match &self.failure {
            Some(message) => Err(eyre!("{}", message)),
            None => Ok(()),
        }
    }
}

/// A toolchain of fakes plus handles to inspect them.
pub struct FakeToolchain {
    pub parser: StaticParser,
    pub generator: RecordingGenerator,
    pub compiler: RecordingCompiler,
}

impl FakeToolchain {
    pub fn new(parsed: ParsedDeclarations) -> Self {
        Self {
            parser: StaticParser::new(parsed),
            generator: RecordingGenerator::new(),
            compiler: RecordingCompiler::new(),
        }
    }

    /// A [`Toolchain`] sharing records with these fakes.
    pub fn toolchain(&self) -> Toolchain {
        Toolchain::new(
            self.parser.clone(),
            self.generator.clone(),
            self.compiler.clone(),
        )
    }
}
