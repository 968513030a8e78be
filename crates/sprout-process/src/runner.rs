//! Process runner implementation.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tracing::{debug, error, instrument, warn};

use crate::command::{CapturedOutput, CommandSpec};
use crate::error::ProcessError;

/// Size of a single stderr read.
const CHUNK_SIZE: usize = 4096;

/// Runs external commands.
///
/// Implementations must only report success for a zero exit code.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
  /// Run the command to completion.
  async fn run(&self, spec: &CommandSpec) -> Result<CapturedOutput, ProcessError>;
}

/// [`ProcessRunner`] backed by `tokio::process`.
#[derive(Debug, Clone, Default)]
pub struct TokioRunner {
  default_timeout: Option<Duration>,
}

impl TokioRunner {
  pub fn new() -> Self {
    Self::default()
  }

  /// Apply `timeout` to every command that doesn't set its own.
  pub fn with_timeout(timeout: Duration) -> Self {
    Self {
      default_timeout: Some(timeout),
    }
  }
}

#[async_trait]
impl ProcessRunner for TokioRunner {
  #[instrument(name = "process_run", skip(self, spec), fields(command = %spec.display()))]
  async fn run(&self, spec: &CommandSpec) -> Result<CapturedOutput, ProcessError> {
    let command = spec.display();

    let mut cmd = Command::new(&spec.program);
    cmd
      .args(&spec.args)
      .stdin(Stdio::null())
      .stderr(Stdio::piped())
      .kill_on_drop(true);
    if spec.capture_stdout {
      cmd.stdout(Stdio::piped());
    } else {
      cmd.stdout(Stdio::null());
    }
    if let Some(dir) = &spec.current_dir {
      cmd.current_dir(dir);
    }

    debug!(cwd = ?spec.current_dir, "process_started");
    let mut child = cmd.spawn().map_err(|source| {
      error!(error = %source, "failed to spawn command");
      ProcessError::Spawn {
        command: command.clone(),
        source,
      }
    })?;

    let stderr = child.stderr.take();
    let stdout = child.stdout.take();

    // Drain both pipes while waiting so a chatty child can't fill a pipe and stall.
    let collect = async {
      tokio::try_join!(read_chunks(stderr), read_all(stdout), child.wait())
    };

    let collected = match spec.timeout.or(self.default_timeout) {
      Some(limit) => match tokio::time::timeout(limit, collect).await {
        Ok(collected) => collected,
        Err(_) => {
          let timeout_ms = u64::try_from(limit.as_millis()).unwrap_or(u64::MAX);
          warn!(timeout_ms, "command timed out, killing");
          if let Err(e) = child.kill().await {
            warn!(error = %e, "failed to kill timed out command");
          }
          return Err(ProcessError::TimedOut {
            command,
            timeout_ms,
          });
        }
      },
      None => collect.await,
    };

    let (stderr, stdout, status) = collected.map_err(|source| ProcessError::Io {
      command: command.clone(),
      source,
    })?;

    debug!(exit_code = ?status.code(), stderr_chunks = stderr.len(), "process_finished");

    match status.code() {
      Some(0) => Ok(CapturedOutput { stderr, stdout }),
      Some(code) => {
        warn!(exit_code = code, "process_failed");
        Err(ProcessError::Exited {
          command,
          code,
          stderr,
        })
      }
      None => {
        warn!("process_failed (signal)");
        Err(ProcessError::Terminated { command, stderr })
      }
    }
  }
}

/// Read a stream to EOF, keeping each read as its own chunk.
async fn read_chunks<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<Vec<String>> {
  let Some(mut reader) = reader else {
    return Ok(Vec::new());
  };

  let mut chunks = Vec::new();
  let mut buf = [0u8; CHUNK_SIZE];
  loop {
    let n = reader.read(&mut buf).await?;
    if n == 0 {
      break;
    }
    chunks.push(String::from_utf8_lossy(&buf[..n]).into_owned());
  }
  Ok(chunks)
}

async fn read_all<R: AsyncRead + Unpin>(reader: Option<R>) -> std::io::Result<Option<String>> {
  let Some(mut reader) = reader else {
    return Ok(None);
  };

  let mut bytes = Vec::new();
  reader.read_to_end(&mut bytes).await?;
  Ok(Some(String::from_utf8_lossy(&bytes).into_owned()))
}
