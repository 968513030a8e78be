//! Run lifecycle events.
//!
//! The orchestrator reports every task state change to an
//! [`ExecutionNotifier`]. The CLI prints progress from them and tests use them
//! to check ordering.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

/// Events emitted during a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionEvent {
  /// The graph passed validation and execution started.
  RunStarted { execution_id: String, tasks: usize },

  /// A task has started executing.
  TaskStarted { execution_id: String, task: String },

  /// A task completed successfully.
  TaskCompleted { execution_id: String, task: String },

  /// A task failed. Only the first failure ends the run.
  TaskFailed {
    execution_id: String,
    task: String,
    error: String,
  },

  /// A task that was still running when the run failed has finished; its
  /// outcome is ignored.
  TaskDiscarded {
    execution_id: String,
    task: String,
    succeeded: bool,
  },

  /// Every task completed.
  RunCompleted { execution_id: String },

  /// The run failed.
  RunFailed { execution_id: String, error: String },
}

/// Receives run events. Called inline by the orchestrator, so keep it cheap.
pub trait ExecutionNotifier: Send + Sync {
  fn notify(&self, event: ExecutionEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Default)]
pub struct NoopNotifier;

impl ExecutionNotifier for NoopNotifier {
  fn notify(&self, _event: ExecutionEvent) {}
}

/// Forwards events to an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
  // Unbounded so a slow consumer never stalls the run; one event per state change.
  sender: mpsc::UnboundedSender<ExecutionEvent>,
}

impl ChannelNotifier {
  pub fn new(sender: mpsc::UnboundedSender<ExecutionEvent>) -> Self {
    Self { sender }
  }
}

impl ExecutionNotifier for ChannelNotifier {
  fn notify(&self, event: ExecutionEvent) {
    // a dropped receiver just stops listening
    let _ = self.sender.send(event);
  }
}
