//! External text transform tools
//!
//! The pipeline treats its linter and minifiers as black boxes behind the
//! [`TextTransform`] trait: text in, text (or a structured failure) out.
//! The shipped implementation shells out synchronously to a configured
//! command. Calls block until the child exits; there is no timeout and no
//! retry.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use thiserror::Error;
use tracing::debug;

use crate::config::ToolConfig;

/// Result type for tool invocations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors from external tool invocations.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch '{program}': {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{name} failed with {status}: {stderr}")]
    Failed {
        name: String,
        status: String,
        stderr: String,
    },

    #[error("{name} has an empty command")]
    EmptyCommand { name: String },

    #[error("{name} produced no output at {path}")]
    MissingOutput { name: String, path: PathBuf },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// How a tool hands its result back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// The tool rewrites the input file; read it back afterwards.
    InPlace,
    /// The tool writes the `{output}` path; read that file.
    #[default]
    File,
    /// The tool prints the result; capture stdout.
    Stdout,
}

/// A text transform: input text in, output text or a structured failure out.
pub trait TextTransform {
    /// Human-readable name for diagnostics.
    fn name(&self) -> &str;

    /// Run the transform over the input text.
    fn apply(&self, input: &str) -> ToolResult<String>;
}

/// Shell-out implementation of [`TextTransform`].
///
/// Writes the input text to a scratch path, expands `{input}` / `{output}`
/// placeholders in the configured argv, runs the command, and collects the
/// result according to the tool's output mode. Any non-zero exit is an
/// error carrying the captured stderr.
pub struct CommandTransform {
    name: String,
    command: Vec<String>,
    mode: OutputMode,
    input_path: PathBuf,
    output_path: PathBuf,
}

impl CommandTransform {
    pub fn new(name: &str, tool: &ToolConfig, input_path: &Path, output_path: &Path) -> Self {
        Self {
            name: name.to_string(),
            command: tool.command.clone(),
            mode: tool.output,
            input_path: input_path.to_path_buf(),
            output_path: output_path.to_path_buf(),
        }
    }

    fn expand(&self, arg: &str) -> String {
        arg.replace("{input}", &self.input_path.to_string_lossy())
            .replace("{output}", &self.output_path.to_string_lossy())
    }
}

impl TextTransform for CommandTransform {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, input: &str) -> ToolResult<String> {
        let (program, args) = self.command.split_first().ok_or_else(|| {
            ToolError::EmptyCommand {
                name: self.name.clone(),
            }
        })?;
        fs::write(&self.input_path, input)?;

        let program = self.expand(program);
        let args: Vec<String> = args.iter().map(|a| self.expand(a)).collect();
        debug!(tool = %self.name, %program, ?args, "invoking external tool");

        let output = Command::new(&program)
            .args(&args)
            .output()
            .map_err(|source| ToolError::Launch {
                program: program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ToolError::Failed {
                name: self.name.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        match self.mode {
            OutputMode::InPlace => Ok(fs::read_to_string(&self.input_path)?),
            OutputMode::File => {
                if !self.output_path.exists() {
                    return Err(ToolError::MissingOutput {
                        name: self.name.clone(),
                        path: self.output_path.clone(),
                    });
                }
                Ok(fs::read_to_string(&self.output_path)?)
            }
            OutputMode::Stdout => Ok(String::from_utf8_lossy(&output.stdout).into_owned()),
        }
    }
}
