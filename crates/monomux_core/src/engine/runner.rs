//! Capture-output runner for external tools.
//!
//! Used by the probe adapter for ffprobe, and available to callers that
//! execute rendered ffmpeg commands. The core itself never inspects a
//! tool's stdout beyond success or failure plus probe JSON.

use std::process::{Command, Stdio};

use crate::errors::{CoreError, CoreResult};

/// Captured output of one external command.
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// External command runner.
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run a command and capture its output.
    ///
    /// A non-zero exit status is not an error here; callers decide based
    /// on `CommandOutput::success`. Only failure to launch the process
    /// at all is an `Err`.
    pub fn run(&self, cmd: &[&str]) -> CoreResult<CommandOutput> {
        let (program, args) = cmd
            .split_first()
            .ok_or_else(|| CoreError::command_failed("<empty>", -1, "empty command"))?;

        tracing::debug!("running: {}", cmd.join(" "));

        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| CoreError::io(format!("spawn {}", program), e))?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            success: output.status.success(),
        })
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}
