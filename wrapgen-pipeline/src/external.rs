//! Collaborators backed by external commands.
//!
//! Each collaborator runs a configured program. Data goes in as arguments or
//! JSON on stdin and comes back as JSON on stdout; stderr is passed through
//! to the user.

use std::{
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
};

use eyre::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    compile::CompileOptions,
    generation::GenerationRequest,
    toolchain::{CodeGenerator, Compiler, DeclarationParser, ParsedDeclarations},
};

/// A non-zero exit from an external tool.
#[derive(Debug, Error)]
#[error("`{command}` exited with {status}")]
pub struct ToolFailed {
    pub command: String,
    pub status: String,
}

/// A program plus the arguments placed before any generated ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalCommand {
    program: String,
    args: Vec<String>,
}

impl ExternalCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn command(&self, extra: &[String]) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args).args(extra);
        command
    }

    fn describe(&self, extra: &[String]) -> String {
        let mut parts = vec![self.program.clone()];
        parts.extend(self.args.iter().cloned());
        parts.extend(extra.iter().cloned());
        parts.join(" ")
    }

    /// Run to completion, feeding `stdin` and capturing stdout.
    fn capture(&self, extra: &[String], stdin: Option<Vec<u8>>) -> Result<String> {
        let description = self.describe(extra);
        debug!(command = %description, "running external tool");

        let mut child = self
            .command(extra)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .wrap_err_with(|| format!("failed to start `{}`", self.program))?;

        // The child may fill its stdout before draining stdin.
        let writer = match (stdin, child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(std::thread::spawn(move || {
                pipe.write_all(&input)
            })),
            _ => None,
        };

        let output = child
            .wait_with_output()
            .wrap_err_with(|| format!("failed to wait for `{}`", self.program))?;

        if let Some(writer) = writer {
            match writer.join() {
                Ok(Err(e)) if e.kind() != std::io::ErrorKind::BrokenPipe => {
                    return Err(e).wrap_err_with(|| {
                        format!("failed to write input to `{}`", self.program)
                    });
                }
                _ => {}
            }
        }

        if !output.status.success() {
            return Err(ToolFailed {
                command: description,
                status: output.status.to_string(),
            }
            .into());
        }

        let stdout = String::from_utf8(output.stdout)
            .wrap_err_with(|| format!("`{}` wrote non UTF-8 output", self.program))?;
        trace!(bytes = stdout.len(), "tool output");
        Ok(stdout)
    }

    /// Run to completion with inherited stdio.
    fn status(&self, extra: &[String]) -> Result<()> {
        let description = self.describe(extra);
        debug!(command = %description, "running external tool");

        let status = self
            .command(extra)
            .stdin(Stdio::null())
            .status()
            .wrap_err_with(|| format!("failed to start `{}`", self.program))?;

        if !status.success() {
            return Err(ToolFailed {
                command: description,
                status: status.to_string(),
            }
            .into());
        }
        Ok(())
    }
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

/// Runs `<command> <args>... --root <root> <files>...` and reads
/// [`ParsedDeclarations`] as JSON from stdout.
#[derive(Debug, Clone)]
pub struct CommandParser {
    command: ExternalCommand,
}

impl CommandParser {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }

    fn arguments(files: &[PathBuf], search_root: &Path) -> Vec<String> {
        let mut args = vec!["--root".to_string(), path_arg(search_root)];
        args.extend(files.iter().map(|f| path_arg(f)));
        args
    }
}

impl DeclarationParser for CommandParser {
    fn parse(&self, files: &[PathBuf], search_root: &Path) -> Result<ParsedDeclarations> {
        let stdout = self
            .command
            .capture(&Self::arguments(files, search_root), None)?;
        serde_json::from_str(&stdout).wrap_err_with(|| {
            format!(
                "`{}` did not print a valid declaration model",
                self.command.program()
            )
        })
    }
}

#[derive(Debug, Default, Deserialize)]
struct GeneratorReply {
    #[serde(default)]
    include_dirs: Vec<PathBuf>,
}

/// Runs `<command> <args>... <target>` with the request as JSON on stdin
/// and reads `{"include_dirs": [...]}` from stdout.
///
/// Empty stdout means no include directories.
#[derive(Debug, Clone)]
pub struct CommandGenerator {
    command: ExternalCommand,
}

impl CommandGenerator {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }
}

impl CodeGenerator for CommandGenerator {
    fn generate(&self, request: &GenerationRequest) -> Result<Vec<PathBuf>> {
        let input = serde_json::to_vec(request).wrap_err("failed to encode generation request")?;
        let stdout = self
            .command
            .capture(&[path_arg(&request.target)], Some(input))?;

        if stdout.trim().is_empty() {
            return Ok(Vec::new());
        }
        let reply: GeneratorReply = serde_json::from_str(&stdout).wrap_err_with(|| {
            format!(
                "`{}` did not print a valid generator reply",
                self.command.program()
            )
        })?;
        Ok(reply.include_dirs)
    }
}

/// Runs `<command> <args>... [--cplus] (-I <dir>)... (-X <key>=<value>)...
/// <target>`.
#[derive(Debug, Clone)]
pub struct CommandCompiler {
    command: ExternalCommand,
}

impl CommandCompiler {
    pub fn new(command: ExternalCommand) -> Self {
        Self { command }
    }

    fn arguments(target: &Path, options: &CompileOptions) -> Vec<String> {
        let mut args = Vec::new();
        if options.cplus {
            args.push("--cplus".to_string());
        }
        for dir in &options.include_path {
            args.push("-I".to_string());
            args.push(path_arg(dir));
        }
        for (key, value) in &options.directives {
            args.push("-X".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(path_arg(target));
        args
    }
}

impl Compiler for CommandCompiler {
    fn compile(&self, target: &Path, options: &CompileOptions) -> Result<()> {
        self.command.status(&Self::arguments(target, options))
    }
}
