// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subprocess execution for the OS printer-listing utilities.
//
// The enumerator never spawns processes itself; it goes through a
// `CommandRunner` so the per-OS parsing can be exercised against canned
// output.

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use directprint_core::error::{DirectPrintError, Result};

/// `CREATE_NO_WINDOW` process creation flag (winbase.h).
#[cfg(windows)]
pub(crate) const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Captured result of a finished command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Whether the process exited with status 0.
    pub success: bool,
    /// Standard output, decoded lossily as UTF-8.
    pub stdout: String,
}

impl CommandOutput {
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
        }
    }

    pub fn failed() -> Self {
        Self {
            success: false,
            stdout: String::new(),
        }
    }
}

/// Runs a program to completion and captures its standard output.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, wait for it to exit, and return its output.
    ///
    /// A non-zero exit is reported through [`CommandOutput::success`]; only a
    /// failure to start or wait on the process is an `Err`.
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput>;
}

/// Runner backed by `tokio::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput> {
        let mut cmd = Command::new(program);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let output = cmd
            .output()
            .await
            .map_err(|e| DirectPrintError::Enumeration(format!("{program}: {e}")))?;

        debug!(
            program,
            status = ?output.status.code(),
            stdout_bytes = output.stdout.len(),
            stderr_bytes = output.stderr.len(),
            "command finished"
        );

        Ok(CommandOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_program_is_an_enumeration_error() {
        let result = SystemRunner
            .run("directprint-definitely-not-a-real-program", &[])
            .await;
        assert!(matches!(result, Err(DirectPrintError::Enumeration(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn captures_stdout_and_exit_status() {
        let output = SystemRunner
            .run("sh", &["-c", "echo printer HP-1; exit 0"])
            .await
            .expect("run sh");
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "printer HP-1");

        let failed = SystemRunner.run("sh", &["-c", "exit 3"]).await.expect("run sh");
        assert!(!failed.success);
    }
}
