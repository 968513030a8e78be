//! Tasks and task maps.

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use sprout_graph::{GraphError, NodeDecl, TaskGraph};
use tracing::instrument;

use crate::context::SharedContext;

/// One unit of orchestrated work.
///
/// Tasks communicate only through the shared context: they read what their
/// dependencies wrote and add their own fields.
#[async_trait]
pub trait Task<C, E>: Send + Sync
where
  C: Send + Sync + 'static,
  E: Send + 'static,
{
  async fn execute(&self, context: &SharedContext<C>) -> Result<(), E>;
}

/// A [`Task`] built from an async closure. See [`from_fn`].
pub struct FnTask<F, Fut> {
  f: F,
  _future: PhantomData<fn() -> Fut>,
}

#[async_trait]
impl<C, E, F, Fut> Task<C, E> for FnTask<F, Fut>
where
  C: Send + Sync + 'static,
  E: Send + 'static,
  F: Fn(SharedContext<C>) -> Fut + Send + Sync,
  Fut: Future<Output = Result<(), E>> + Send,
{
  async fn execute(&self, context: &SharedContext<C>) -> Result<(), E> {
    (self.f)(context.clone()).await
  }
}

/// Wrap an async closure as a task.
pub fn from_fn<C, E, F, Fut>(f: F) -> Arc<dyn Task<C, E>>
where
  C: Send + Sync + 'static,
  E: Send + 'static,
  F: Fn(SharedContext<C>) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<(), E>> + Send + 'static,
{
  Arc::new(FnTask {
    f,
    _future: PhantomData,
  })
}

/// Dependencies and body of one entry in a [`TaskMap`].
pub struct TaskSpec<C, E> {
  pub depends_on: Vec<String>,
  pub task: Arc<dyn Task<C, E>>,
}

impl<C, E> Clone for TaskSpec<C, E> {
  fn clone(&self) -> Self {
    Self {
      depends_on: self.depends_on.clone(),
      task: Arc::clone(&self.task),
    }
  }
}

/// Declarative mapping of task name to [`TaskSpec`].
///
/// Nothing is checked until the map is handed to the orchestrator.
pub struct TaskMap<C, E> {
  entries: Vec<(String, TaskSpec<C, E>)>,
}

impl<C, E> TaskMap<C, E>
where
  C: Send + Sync + 'static,
  E: Send + 'static,
{
  pub fn new() -> Self {
    Self {
      entries: Vec::new(),
    }
  }

  /// Add a task. Builder form of [`TaskMap::insert`].
  pub fn task<I, S>(
    mut self,
    name: impl Into<String>,
    depends_on: I,
    task: Arc<dyn Task<C, E>>,
  ) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.insert(name, depends_on, task);
    self
  }

  pub fn insert<I, S>(&mut self, name: impl Into<String>, depends_on: I, task: Arc<dyn Task<C, E>>)
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.entries.push((
      name.into(),
      TaskSpec {
        depends_on: depends_on.into_iter().map(Into::into).collect(),
        task,
      },
    ));
  }

  pub fn get(&self, name: &str) -> Option<&TaskSpec<C, E>> {
    self
      .entries
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, spec)| spec)
  }

  /// Task names in insertion order.
  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.entries.iter().map(|(n, _)| n.as_str())
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// Validate the map into an executable graph.
  pub fn into_graph(self) -> Result<TaskGraph<Arc<dyn Task<C, E>>>, GraphError> {
    TaskGraph::new(
      self
        .entries
        .into_iter()
        .map(|(name, spec)| NodeDecl::new(name, spec.depends_on, spec.task))
        .collect(),
    )
  }
}

impl<C, E> Default for TaskMap<C, E>
where
  C: Send + Sync + 'static,
  E: Send + 'static,
{
  fn default() -> Self {
    Self::new()
  }
}

/// A task bound to its name and the run's context, ready to be spawned.
pub struct NamedTask<C, E> {
  name: String,
  task: Arc<dyn Task<C, E>>,
  context: SharedContext<C>,
}

impl<C, E> NamedTask<C, E>
where
  C: Send + Sync + 'static,
  E: Send + 'static,
{
  pub fn new(
    name: impl Into<String>,
    task: Arc<dyn Task<C, E>>,
    context: SharedContext<C>,
  ) -> Self {
    Self {
      name: name.into(),
      task,
      context,
    }
  }

  /// Execute the task. The single returned value is its only completion signal.
  #[instrument(name = "task_execute", skip(self), fields(task = %self.name))]
  pub async fn run(self) -> (String, Result<(), E>) {
    let result = self.task.execute(&self.context).await;
    (self.name, result)
  }
}
