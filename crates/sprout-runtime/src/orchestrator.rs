//! Dependency-ordered task execution.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use sprout_graph::TaskGraph;
use tokio::task::{Id, JoinSet};
use tracing::{error, info, instrument, warn};

use crate::context::SharedContext;
use crate::error::RunError;
use crate::events::{ExecutionEvent, ExecutionNotifier, NoopNotifier};
use crate::state::{ExecutionState, TaskState};
use crate::task::{NamedTask, Task, TaskMap};

/// Summary of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
  pub execution_id: String,
  /// Task names in the order they completed.
  pub completed: Vec<String>,
}

/// Runs a [`TaskMap`] to completion.
///
/// A task starts as soon as all of its dependencies are done, so independent
/// tasks overlap. After the first failure no new task is started; tasks that
/// are already running are awaited and their outcomes ignored.
pub struct Orchestrator {
  notifier: Arc<dyn ExecutionNotifier>,
}

impl Orchestrator {
  pub fn new() -> Self {
    Self::with_notifier(Arc::new(NoopNotifier))
  }

  pub fn with_notifier(notifier: Arc<dyn ExecutionNotifier>) -> Self {
    Self { notifier }
  }

  /// Validate `tasks` and execute them against `context`.
  ///
  /// Graph errors are returned before any task starts.
  #[instrument(name = "orchestrator_run", skip_all, fields(tasks = tasks.len()))]
  pub async fn run<C, E>(
    &self,
    tasks: TaskMap<C, E>,
    context: &SharedContext<C>,
  ) -> Result<RunReport, RunError<E>>
  where
    C: Send + Sync + 'static,
    E: std::error::Error + Send + Sync + 'static,
  {
    let execution_id = uuid::Uuid::new_v4().to_string();

    let graph = tasks.into_graph().map_err(|e| {
      error!(execution_id = %execution_id, error = %e, "run_rejected");
      RunError::Graph(e)
    })?;

    info!(execution_id = %execution_id, tasks = graph.len(), "run_started");
    self.notifier.notify(ExecutionEvent::RunStarted {
      execution_id: execution_id.clone(),
      tasks: graph.len(),
    });

    let state = ExecutionState::new(graph.names());
    let run = RunLoop {
      execution_id: execution_id.clone(),
      graph,
      context,
      notifier: self.notifier.as_ref(),
      state,
      running: JoinSet::new(),
      running_ids: HashMap::new(),
      completed: Vec::new(),
    };

    let result = run.drive().await;

    match &result {
      Ok(report) => {
        info!(execution_id = %execution_id, completed = report.completed.len(), "run_completed");
        self.notifier.notify(ExecutionEvent::RunCompleted {
          execution_id: execution_id.clone(),
        });
      }
      Err(e) => {
        error!(execution_id = %execution_id, error = %e, "run_failed");
        self.notifier.notify(ExecutionEvent::RunFailed {
          execution_id: execution_id.clone(),
          error: e.to_string(),
        });
      }
    }

    result
  }
}

impl Default for Orchestrator {
  fn default() -> Self {
    Self::new()
  }
}

/// How a spawned task ended.
enum Outcome<E> {
  Done,
  Failed(E),
  Panicked(String),
}

/// Mutable state of one run.
struct RunLoop<'a, C, E> {
  execution_id: String,
  graph: TaskGraph<Arc<dyn Task<C, E>>>,
  context: &'a SharedContext<C>,
  notifier: &'a dyn ExecutionNotifier,
  state: ExecutionState,
  running: JoinSet<(String, Result<(), E>)>,
  running_ids: HashMap<Id, String>,
  completed: Vec<String>,
}

impl<C, E> RunLoop<'_, C, E>
where
  C: Send + Sync + 'static,
  E: std::error::Error + Send + Sync + 'static,
{
  async fn drive(mut self) -> Result<RunReport, RunError<E>> {
    let entry_points = self.graph.graph().entry_points().to_vec();
    self.start_eligible(&entry_points);

    let mut failure: Option<RunError<E>> = None;

    while let Some(joined) = self.running.join_next_with_id().await {
      let (task, outcome) = match joined {
        Ok((id, (task, result))) => {
          self.running_ids.remove(&id);
          let outcome = match result {
            Ok(()) => Outcome::Done,
            Err(e) => Outcome::Failed(e),
          };
          (task, outcome)
        }
        Err(join_error) => {
          let task = self
            .running_ids
            .remove(&join_error.id())
            .unwrap_or_default();
          (task, Outcome::Panicked(join_error.to_string()))
        }
      };

      if failure.is_some() {
        self.discard(&task, outcome);
        continue;
      }

      match outcome {
        Outcome::Done => {
          self.state.mark_done(&task);
          info!(execution_id = %self.execution_id, task = %task, "task_completed");
          self.notifier.notify(ExecutionEvent::TaskCompleted {
            execution_id: self.execution_id.clone(),
            task: task.clone(),
          });
          self.completed.push(task.clone());

          let dependents = self.graph.graph().dependents(&task).to_vec();
          self.start_eligible(&dependents);
        }
        Outcome::Failed(source) => {
          self.record_failure(&task, source.to_string());
          failure = Some(RunError::TaskFailed {
            task,
            source,
            completed: self.completed.clone(),
          });
        }
        Outcome::Panicked(message) => {
          self.record_failure(&task, message.clone());
          failure = Some(RunError::TaskPanicked {
            task,
            message,
            completed: self.completed.clone(),
          });
        }
      }
    }

    if let Some(error) = failure {
      return Err(error);
    }

    // a validated graph always drains completely
    debug_assert!(self.state.names_in(TaskState::Pending).is_empty());

    Ok(RunReport {
      execution_id: self.execution_id,
      completed: self.completed,
    })
  }

  /// Spawn every candidate whose dependencies are all done.
  fn start_eligible(&mut self, candidates: &[String]) {
    for name in candidates {
      if !self.state.is_eligible(name, self.graph.graph()) {
        continue;
      }
      let Some(task) = self.graph.get(name) else {
        continue;
      };

      self.state.mark_running(name);
      info!(execution_id = %self.execution_id, task = %name, "task_started");
      self.notifier.notify(ExecutionEvent::TaskStarted {
        execution_id: self.execution_id.clone(),
        task: name.clone(),
      });

      let named = NamedTask::new(name.clone(), Arc::clone(task), self.context.clone());
      let handle = self.running.spawn(named.run());
      self.running_ids.insert(handle.id(), name.clone());
    }
  }

  /// Mark the first failing task and report it.
  fn record_failure(&mut self, task: &str, message: String) {
    self.state.mark_failed(task);
    error!(execution_id = %self.execution_id, task = %task, error = %message, "task_failed");
    self.notifier.notify(ExecutionEvent::TaskFailed {
      execution_id: self.execution_id.clone(),
      task: task.to_string(),
      error: message,
    });
    if !self.running.is_empty() {
      warn!(
        execution_id = %self.execution_id,
        still_running = self.running.len(),
        "waiting for running tasks before failing"
      );
    }
  }

  /// Record the outcome of a task that finished after the run failed.
  fn discard(&mut self, task: &str, outcome: Outcome<E>) {
    let succeeded = matches!(outcome, Outcome::Done);
    if succeeded {
      self.state.mark_done(task);
    } else {
      self.state.mark_failed(task);
    }
    warn!(execution_id = %self.execution_id, task = %task, succeeded, "task_discarded");
    self.notifier.notify(ExecutionEvent::TaskDiscarded {
      execution_id: self.execution_id.clone(),
      task: task.to_string(),
      succeeded,
    });
  }
}
