//! Formatting seam for the assembled output.
//!
//! The generator never depends on a particular pretty-printer. Callers pass a
//! `Formatter`; `CommandFormatter` pipes the text through an external
//! program such as `prettier`.

use std::io::Write;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

use crate::output::GuardOutput;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("no formatter command configured")]
    EmptyCommand,
    #[error("failed to run formatter `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("formatter `{program}` exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },
    #[error("formatter output is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// Re-prints TypeScript source; must not change its meaning.
pub trait Formatter {
    fn format(&self, code: &str) -> Result<String, FormatError>;
}

/// Runs `program args...` with the code on stdin and reads the result from stdout.
#[derive(Debug, Clone)]
pub struct CommandFormatter {
    program: String,
    args: Vec<String>,
}

impl CommandFormatter {
    /// `argv[0]` is the program, the rest are its arguments.
    pub fn from_argv(argv: &[String]) -> Result<Self, FormatError> {
        let (program, args) = argv.split_first().ok_or(FormatError::EmptyCommand)?;
        Ok(CommandFormatter {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// `prettier --parser typescript`
    pub fn prettier() -> Self {
        CommandFormatter {
            program: "prettier".to_string(),
            args: vec!["--parser".to_string(), "typescript".to_string()],
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn spawn_error(&self, source: std::io::Error) -> FormatError {
        FormatError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

impl Formatter for CommandFormatter {
    fn format(&self, code: &str) -> Result<String, FormatError> {
        debug!(program = %self.program, bytes = code.len(), "running formatter");
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        // Fed from another thread: the formatter may fill stdout before it
        // has read all of stdin.
        let stdin = child.stdin.take();
        let input = code.to_string();
        let writer = std::thread::spawn(move || -> std::io::Result<()> {
            if let Some(mut stdin) = stdin {
                stdin.write_all(input.as_bytes())?;
            }
            Ok(())
        });

        let output = child.wait_with_output().map_err(|e| self.spawn_error(e))?;
        let written = writer
            .join()
            .unwrap_or_else(|_| Err(std::io::Error::other("stdin writer panicked")));

        if !output.status.success() {
            return Err(FormatError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written.map_err(|e| self.spawn_error(e))?;
        Ok(String::from_utf8(output.stdout)?)
    }
}

/// Render `output`, then apply `formatter` if one is given.
pub fn render_formatted(
    output: &GuardOutput,
    formatter: Option<&dyn Formatter>,
) -> Result<String, FormatError> {
    let text = output.render();
    match formatter {
        Some(formatter) => formatter.format(&text),
        None => Ok(text),
    }
}
