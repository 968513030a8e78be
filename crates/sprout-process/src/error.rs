//! Subprocess errors.

use thiserror::Error;

/// Errors that can occur while running an external command.
#[derive(Debug, Error)]
pub enum ProcessError {
  /// The process could not be started at all (e.g. missing executable).
  #[error("failed to start {command}")]
  Spawn {
    command: String,
    #[source]
    source: std::io::Error,
  },

  /// The process exited with a non-zero code.
  #[error("{command} returned with code {code}")]
  Exited {
    command: String,
    code: i32,
    stderr: Vec<String>,
  },

  /// The process was terminated by a signal.
  #[error("{command} was terminated by a signal")]
  Terminated { command: String, stderr: Vec<String> },

  /// The process did not finish before its deadline and was killed.
  #[error("{command} timed out after {timeout_ms}ms")]
  TimedOut { command: String, timeout_ms: u64 },

  /// Reading the process output or waiting on it failed.
  #[error("i/o error while running {command}")]
  Io {
    command: String,
    #[source]
    source: std::io::Error,
  },
}

impl ProcessError {
  /// The command line this error refers to.
  pub fn command(&self) -> &str {
    match self {
      Self::Spawn { command, .. }
      | Self::Exited { command, .. }
      | Self::Terminated { command, .. }
      | Self::TimedOut { command, .. }
      | Self::Io { command, .. } => command,
    }
  }

  /// The exit code, if the process ran and exited normally.
  pub fn exit_code(&self) -> Option<i32> {
    match self {
      Self::Exited { code, .. } => Some(*code),
      _ => None,
    }
  }

  /// Stderr chunks captured before the failure, if any.
  pub fn stderr(&self) -> &[String] {
    match self {
      Self::Exited { stderr, .. } | Self::Terminated { stderr, .. } => stderr,
      _ => &[],
    }
  }
}
