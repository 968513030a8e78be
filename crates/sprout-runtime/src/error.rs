//! Orchestration errors.

use sprout_graph::GraphError;
use thiserror::Error;

/// Why a run did not complete.
#[derive(Debug, Error)]
pub enum RunError<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// The task map was rejected before anything ran.
  #[error("invalid task graph: {0}")]
  Graph(#[from] GraphError),

  /// The first task to fail. Later outcomes are discarded.
  #[error("task '{task}' failed")]
  TaskFailed {
    task: String,
    #[source]
    source: E,
    /// Tasks that finished successfully before the failure.
    completed: Vec<String>,
  },

  /// A task panicked instead of returning.
  #[error("task '{task}' panicked: {message}")]
  TaskPanicked {
    task: String,
    message: String,
    completed: Vec<String>,
  },
}

impl<E> RunError<E>
where
  E: std::error::Error + Send + Sync + 'static,
{
  /// Name of the task that ended the run, if a task did.
  pub fn task(&self) -> Option<&str> {
    match self {
      Self::TaskFailed { task, .. } | Self::TaskPanicked { task, .. } => Some(task),
      _ => None,
    }
  }

  /// Tasks that completed before the run ended.
  pub fn completed(&self) -> &[String] {
    match self {
      Self::TaskFailed { completed, .. } | Self::TaskPanicked { completed, .. } => completed,
      _ => &[],
    }
  }
}
