//! Shared subprocess invocation primitive.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

/// Outcome of an external command invocation.
///
/// A non-zero exit or a spawn failure is data here, not an `Err`: callers
/// decide whether a failed command gates the rest of their pipeline.
#[derive(Debug, Clone)]
pub struct CommandOutcome {
    /// The rendered command line, for logs and reports.
    pub command: String,
    /// Whether the command ran and exited successfully.
    pub success: bool,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
    /// Failure detail (exit status or spawn error), if any.
    pub failure: Option<String>,
}

/// Runs external commands synchronously with respect to the pipeline,
/// capturing their output.
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
}

impl CommandRunner {
    /// Create a runner that routes every invocation through `program`.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// The program every invocation is routed through.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Run the program with `args`, optionally scoped to `cwd`.
    ///
    /// Captured output is logged. On non-zero exit or spawn error, an error
    /// including the command line and the working directory is logged and
    /// the failure is returned in the [`CommandOutcome`] - never as an
    /// `Err`.
    pub async fn run(&self, args: &[String], cwd: Option<&Path>) -> CommandOutcome {
        let rendered = self.render(args);
        let workdir = cwd
            .map(Path::to_path_buf)
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        tracing::info!(command = %rendered, cwd = %workdir.display(), "Running command...");

        let mut cmd = Command::new(&self.program);
        cmd.args(args).stdout(Stdio::piped()).stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        match cmd.output().await {
            Ok(output) => {
                let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
                let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
                if !stdout.trim().is_empty() {
                    tracing::info!(command = %rendered, "{}", stdout.trim_end());
                }
                if !stderr.trim().is_empty() {
                    tracing::debug!(command = %rendered, "{}", stderr.trim_end());
                }

                let failure = if output.status.success() {
                    None
                } else {
                    tracing::error!(
                        command = %rendered,
                        cwd = %workdir.display(),
                        status = %output.status,
                        "Command failed"
                    );
                    Some(format!("exited with {}", output.status))
                };

                CommandOutcome {
                    command: rendered,
                    success: failure.is_none(),
                    stdout,
                    stderr,
                    failure,
                }
            }
            Err(err) => {
                tracing::error!(
                    command = %rendered,
                    cwd = %workdir.display(),
                    error = %err,
                    "Failed to spawn command"
                );
                CommandOutcome {
                    command: rendered,
                    success: false,
                    stdout: String::new(),
                    stderr: String::new(),
                    failure: Some(format!("failed to spawn: {err}")),
                }
            }
        }
    }

    fn render(&self, args: &[String]) -> String {
        std::iter::once(self.program.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
