//! Per-run task states.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sprout_graph::Graph;

/// Lifecycle of one task within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
  Pending,
  Running,
  Done,
  Failed,
}

/// State of every task in one run.
///
/// Only `Pending -> Running -> Done | Failed` transitions are accepted.
#[derive(Debug, Clone, Default)]
pub struct ExecutionState {
  states: HashMap<String, TaskState>,
}

impl ExecutionState {
  /// All `names` start out pending.
  pub fn new<'a, I>(names: I) -> Self
  where
    I: IntoIterator<Item = &'a String>,
  {
    Self {
      states: names
        .into_iter()
        .map(|n| (n.clone(), TaskState::Pending))
        .collect(),
    }
  }

  pub fn get(&self, name: &str) -> Option<TaskState> {
    self.states.get(name).copied()
  }

  /// Pending, with every dependency done.
  pub fn is_eligible(&self, name: &str, graph: &Graph) -> bool {
    self.get(name) == Some(TaskState::Pending)
      && graph
        .dependencies(name)
        .iter()
        .all(|dep| self.get(dep) == Some(TaskState::Done))
  }

  pub fn mark_running(&mut self, name: &str) -> bool {
    self.transition(name, TaskState::Pending, TaskState::Running)
  }

  pub fn mark_done(&mut self, name: &str) -> bool {
    self.transition(name, TaskState::Running, TaskState::Done)
  }

  pub fn mark_failed(&mut self, name: &str) -> bool {
    self.transition(name, TaskState::Running, TaskState::Failed)
  }

  /// Names currently in `state`, sorted.
  pub fn names_in(&self, state: TaskState) -> Vec<String> {
    let mut names: Vec<String> = self
      .states
      .iter()
      .filter(|(_, s)| **s == state)
      .map(|(n, _)| n.clone())
      .collect();
    names.sort();
    names
  }

  fn transition(&mut self, name: &str, from: TaskState, to: TaskState) -> bool {
    match self.states.get_mut(name) {
      Some(current) if *current == from => {
        *current = to;
        true
      }
      _ => false,
    }
  }
}
