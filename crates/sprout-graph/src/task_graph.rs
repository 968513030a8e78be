//! Validated task graphs.

use std::collections::{HashMap, HashSet};

use crate::error::GraphError;
use crate::graph::Graph;

/// Declaration of one node: its name, what it depends on, and its payload.
#[derive(Debug, Clone)]
pub struct NodeDecl<T> {
  pub name: String,
  pub depends_on: Vec<String>,
  pub payload: T,
}

impl<T> NodeDecl<T> {
  pub fn new<I, S>(name: impl Into<String>, depends_on: I, payload: T) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      name: name.into(),
      depends_on: depends_on.into_iter().map(Into::into).collect(),
      payload,
    }
  }
}

/// A validated, acyclic task graph.
///
/// The node set and edges are fixed once constructed.
#[derive(Debug)]
pub struct TaskGraph<T> {
  /// Node names in declaration order.
  names: Vec<String>,
  payloads: HashMap<String, T>,
  graph: Graph,
}

impl<T> TaskGraph<T> {
  /// Validate the declarations and build the graph.
  pub fn new(decls: Vec<NodeDecl<T>>) -> Result<Self, GraphError> {
    let mut seen = HashSet::new();
    for decl in &decls {
      if !seen.insert(decl.name.as_str()) {
        return Err(GraphError::DuplicateTask {
          name: decl.name.clone(),
        });
      }
    }

    for decl in &decls {
      if let Some(missing) = decl.depends_on.iter().find(|d| !seen.contains(d.as_str())) {
        return Err(GraphError::UnknownDependency {
          task: decl.name.clone(),
          dependency: missing.clone(),
        });
      }
    }

    let graph = Graph::new(
      decls
        .iter()
        .map(|d| (d.name.as_str(), d.depends_on.as_slice())),
    );
    let names: Vec<String> = decls.iter().map(|d| d.name.clone()).collect();

    detect_cycle(&names, &graph)?;

    let payloads = decls.into_iter().map(|d| (d.name, d.payload)).collect();

    Ok(Self {
      names,
      payloads,
      graph,
    })
  }

  /// Node names in declaration order.
  pub fn names(&self) -> &[String] {
    &self.names
  }

  pub fn get(&self, name: &str) -> Option<&T> {
    self.payloads.get(name)
  }

  pub fn graph(&self) -> &Graph {
    &self.graph
  }

  pub fn len(&self) -> usize {
    self.names.len()
  }

  pub fn is_empty(&self) -> bool {
    self.names.is_empty()
  }
}

/// Check for cycles using DFS over dependency edges.
fn detect_cycle(names: &[String], graph: &Graph) -> Result<(), GraphError> {
  #[derive(Clone, Copy, PartialEq)]
  enum Color {
    White,
    Gray,
    Black,
  }

  fn dfs<'a>(
    node: &'a str,
    graph: &'a Graph,
    color: &mut HashMap<&'a str, Color>,
    stack: &mut Vec<&'a str>,
  ) -> Option<Vec<String>> {
    color.insert(node, Color::Gray);
    stack.push(node);

    for dep in graph.dependencies(node) {
      match color.get(dep.as_str()).copied().unwrap_or(Color::White) {
        Color::Gray => {
          // Back edge: the cycle is the stack from `dep` onwards.
          let start = stack.iter().position(|n| *n == dep.as_str()).unwrap_or(0);
          let mut path: Vec<String> = stack[start..].iter().map(|n| n.to_string()).collect();
          path.push(dep.clone());
          return Some(path);
        }
        Color::White => {
          if let Some(path) = dfs(dep.as_str(), graph, color, stack) {
            return Some(path);
          }
        }
        Color::Black => {}
      }
    }

    stack.pop();
    color.insert(node, Color::Black);
    None
  }

  let mut color: HashMap<&str, Color> = names.iter().map(|n| (n.as_str(), Color::White)).collect();
  let mut stack = Vec::new();

  for name in names {
    if color.get(name.as_str()) == Some(&Color::White) {
      if let Some(path) = dfs(name.as_str(), graph, &mut color, &mut stack) {
        return Err(GraphError::CycleDetected { path });
      }
    }
  }

  Ok(())
}
