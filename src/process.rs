//! External Process Runner
//!
//! Blocking-until-exit invocation of the engine binaries. No timeout is
//! applied: a hung child hangs the caller.

use anyhow::{Context, Result};
use std::ffi::OsStr;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::error::PipelineError;

const MAX_STDERR_LEN: usize = 2000;

/// Captured result of a finished child process
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Run `program` with `args` and collect its output.
pub async fn run_command<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<ProcessOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    collect_output(build_command(program.as_ref(), args)).await
}

/// Like [`run_command`] but a non-zero exit becomes [`PipelineError::ProcessFailed`].
pub async fn run_checked<I, S>(program: impl AsRef<OsStr>, args: I) -> Result<ProcessOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    check_exit(build_command(program.as_ref(), args)).await
}

/// [`run_checked`] with extra environment variables set for the child.
pub async fn run_checked_with_env<I, S, E, K, V>(
    program: impl AsRef<OsStr>,
    args: I,
    envs: E,
) -> Result<ProcessOutput>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
    E: IntoIterator<Item = (K, V)>,
    K: AsRef<OsStr>,
    V: AsRef<OsStr>,
{
    let mut command = build_command(program.as_ref(), args);
    command.envs(envs);
    check_exit(command).await
}

fn build_command<I, S>(program: &OsStr, args: I) -> Command
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let mut command = Command::new(program);
    command.args(args);
    command
}

async fn collect_output(mut command: Command) -> Result<ProcessOutput> {
    debug!("Running command: {:?}", command.as_std());
    let program = command.as_std().get_program().to_string_lossy().to_string();

    let output = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .stdin(Stdio::null())
        .output()
        .await
        .with_context(|| format!("Failed to execute {}", program))?;

    Ok(ProcessOutput {
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        code: output.status.code().unwrap_or(-1),
    })
}

async fn check_exit(command: Command) -> Result<ProcessOutput> {
    let program = command.as_std().get_program().to_string_lossy().to_string();
    let output = collect_output(command).await?;

    let stdout = output.stdout.trim();
    if !stdout.is_empty() {
        debug!("{} stdout:\n{}", program, tail(stdout, MAX_STDERR_LEN));
    }
    if !output.success() {
        return Err(PipelineError::ProcessFailed {
            program,
            status: output.code,
            stderr: tail(output.stderr.trim(), MAX_STDERR_LEN),
        }
        .into());
    }
    Ok(output)
}

/// Keep the last `max_len` bytes, respecting char boundaries.
fn tail(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut start = s.len() - max_len;
    while !s.is_char_boundary(start) {
        start += 1;
    }
    format!("...{}", &s[start..])
}
