//! Process execution utilities
//!
//! Runs the external commands the scaffolding action depends on (package
//! manager installs and version lookups). A command that cannot be spawned or
//! exits unsuccessfully becomes [`CreateError::Process`], which the execution
//! controller reports as a named command failure.

use crate::error::{CreateError, Result};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, info, instrument};

/// Utility for running external processes
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    debug: bool,
}

/// Result of a process execution
#[derive(Debug)]
pub struct ProcessResult {
    /// Exit status code
    pub exit_code: Option<i32>,
    /// Standard output
    pub stdout: String,
    /// Standard error
    pub stderr: String,
    /// Whether the process was successful
    pub success: bool,
}

/// Render a command line the way it is reported to the user
pub fn command_line(command: &str, args: &[&str]) -> String {
    std::iter::once(command)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ")
}

impl ProcessRunner {
    /// Create a new process runner
    #[must_use]
    pub const fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Run a command with arguments, inheriting stdout/stderr
    #[instrument(skip(self))]
    pub async fn run_command(&self, command: &str, args: &[&str], cwd: Option<&Path>) -> Result<()> {
        let cmd_str = command_line(command, args);

        if self.debug {
            debug!("Running command: {} (cwd: {:?})", cmd_str, cwd);
        } else {
            info!("+ {}", cmd_str);
        }

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let status = cmd
            .status()
            .await
            .map_err(|e| CreateError::spawn(cmd_str.clone(), e))?;

        if !status.success() {
            return Err(CreateError::process(cmd_str, status.code()));
        }

        debug!("Command completed successfully");
        Ok(())
    }

    /// Run a command and capture its output
    #[instrument(skip(self))]
    pub async fn run_command_with_output(
        &self,
        command: &str,
        args: &[&str],
        cwd: Option<&Path>,
    ) -> Result<ProcessResult> {
        let cmd_str = command_line(command, args);

        debug!("Running command with output capture: {}", cmd_str);

        let mut cmd = Command::new(command);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if let Some(dir) = cwd {
            cmd.current_dir(dir);
        }

        let output = cmd
            .output()
            .await
            .map_err(|e| CreateError::spawn(cmd_str.clone(), e))?;

        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let success = output.status.success();
        let exit_code = output.status.code();

        debug!(
            "Command finished: success={}, exit_code={:?}, stdout_len={}, stderr_len={}",
            success,
            exit_code,
            stdout.len(),
            stderr.len()
        );

        if !success {
            debug!("Command stderr: {}", stderr);
            return Err(CreateError::process(cmd_str, exit_code));
        }

        Ok(ProcessResult {
            exit_code,
            stdout,
            stderr,
            success,
        })
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(false)
    }
}
