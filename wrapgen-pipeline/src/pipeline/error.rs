use miette::Diagnostic;
use thiserror::Error;

/// Fatal configuration problems detected by the pipeline itself.
#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    #[error("out file has wrong extension: '.{required}' required")]
    #[diagnostic(code(wrapgen::wrong_extension))]
    WrongOutExtension { required: String },

    #[error("no {extension} input files specified")]
    #[diagnostic(
        code(wrapgen::no_declarations),
        help("pass declaration files, directories or glob patterns as arguments")
    )]
    NoDeclarations { extension: String },
}
