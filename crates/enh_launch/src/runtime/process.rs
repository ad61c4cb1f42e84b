//! Pipeline process spawning and exit status mapping

use crate::runtime::Invocation;
use std::io::ErrorKind;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// Exit code used by shells when the command cannot be found
pub const EXIT_NOT_FOUND: i32 = 127;

/// Exit code used by shells when the command is not executable
pub const EXIT_NOT_EXECUTABLE: i32 = 126;

/// Exit code for failures of the launcher itself
pub const EXIT_FAILURE: i32 = 1;

/// How the pipeline process terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exited normally with a status code
    Exited(i32),
    /// Terminated by a signal
    Signaled(i32),
}

impl ExitOutcome {
    /// The exit code the launcher reports, following shell conventions
    pub fn exit_code(&self) -> i32 {
        match self {
            ExitOutcome::Exited(code) => *code,
            ExitOutcome::Signaled(signal) => 128 + signal,
        }
    }

    pub fn success(&self) -> bool {
        matches!(self, ExitOutcome::Exited(0))
    }
}

impl From<ExitStatus> for ExitOutcome {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExitOutcome::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;

            if let Some(signal) = status.signal() {
                return ExitOutcome::Signaled(signal);
            }
        }

        ExitOutcome::Exited(EXIT_FAILURE)
    }
}

/// The external pipeline, run in the foreground
#[derive(Debug, Default)]
pub struct PipelineProcess;

impl PipelineProcess {
    /// Spawn the pipeline and wait for it to finish
    ///
    /// Standard streams are inherited, so the pipeline's output reaches the
    /// caller untouched.
    pub async fn run(&self, invocation: &Invocation) -> Result<ExitOutcome, ProcessError> {
        let executable = invocation.executable().to_string_lossy().into_owned();

        let mut child = Command::new(invocation.executable())
            .args(invocation.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| ProcessError::SpawnFailed {
                executable: executable.clone(),
                source: e,
            })?;

        log::debug!("Pipeline started with PID: {:?}", child.id());

        let status = child
            .wait()
            .await
            .map_err(|e| ProcessError::WaitFailed {
                executable: executable.clone(),
                source: e,
            })?;

        let outcome = ExitOutcome::from(status);
        log::debug!("Pipeline '{}' finished: {:?}", executable, outcome);
        Ok(outcome)
    }
}

/// Errors that can occur while running the pipeline
#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Failed to spawn '{executable}': {source}")]
    SpawnFailed {
        executable: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed waiting for '{executable}': {source}")]
    WaitFailed {
        executable: String,
        #[source]
        source: std::io::Error,
    },
}

impl ProcessError {
    /// Exit code reported when the pipeline never produced a status
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessError::SpawnFailed { source, .. } => match source.kind() {
                ErrorKind::NotFound => EXIT_NOT_FOUND,
                ErrorKind::PermissionDenied => EXIT_NOT_EXECUTABLE,
                _ => EXIT_FAILURE,
            },
            ProcessError::WaitFailed { .. } => EXIT_FAILURE,
        }
    }
}
