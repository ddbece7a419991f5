//! One-shot execution of external command lines

use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("failed to launch command: {0}")]
    Spawn(#[from] std::io::Error),

    /// Non-zero exit. The message is the captured standard error, which the
    /// underlying tool may leave empty.
    #[error("{stderr}")]
    Exit { code: i32, stderr: String },
}

impl ShellError {
    /// A non-zero exit that produced no diagnostic text. Indistinguishable
    /// from an interactive cancel at this layer; the pipeline reports it
    /// as one.
    pub fn is_silent_exit(&self) -> bool {
        matches!(self, ShellError::Exit { stderr, .. } if stderr.is_empty())
    }
}

/// Runs exactly one opaque command line to completion.
///
/// The line is handed to the shell as-is. Callers own safe construction:
/// interpolated paths and URLs must not contain pipeline-breaking
/// characters.
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&self, command_line: &str) -> Result<(), ShellError>;
}

/// Production runner: `sh -c <line>`, single attempt, no timeout. A hung
/// command blocks the caller indefinitely.
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellCommandRunner;

impl CommandRunner for ShellCommandRunner {
    async fn run(&self, command_line: &str) -> Result<(), ShellError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command_line)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await?;

        if output.status.success() {
            Ok(())
        } else {
            Err(ShellError::Exit {
                code: output.status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&output.stderr)
                    .trim_end()
                    .to_string(),
            })
        }
    }
}
