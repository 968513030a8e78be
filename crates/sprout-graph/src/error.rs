use thiserror::Error;

/// A malformed task graph. Always detected before execution starts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  /// Two nodes share a name.
  #[error("duplicate task name: {name}")]
  DuplicateTask { name: String },

  /// A node depends on a name that isn't in the graph.
  #[error("task '{task}' depends on unknown task '{dependency}'")]
  UnknownDependency { task: String, dependency: String },

  /// The dependency relation contains a cycle.
  #[error("cycle detected in task graph: {}", .path.join(" -> "))]
  CycleDetected { path: Vec<String> },
}
