use std::collections::HashMap;

/// Dependency structure for traversal.
///
/// Edges point from a dependency to its dependents, so entry points are the
/// nodes that depend on nothing.
#[derive(Debug, Clone, Default)]
pub struct Graph {
  /// Adjacency list: node -> nodes that depend on it.
  dependents: HashMap<String, Vec<String>>,
  /// Reverse adjacency: node -> nodes it depends on.
  dependencies: HashMap<String, Vec<String>>,
  /// Nodes with no dependencies, in declaration order.
  entry_points: Vec<String>,
}

impl Graph {
  /// Build a graph from `(name, dependencies)` pairs.
  ///
  /// Dependencies that aren't declared are kept as-is; validation is the
  /// caller's job (see [`crate::TaskGraph`]).
  pub fn new<'a, I>(decls: I) -> Self
  where
    I: IntoIterator<Item = (&'a str, &'a [String])>,
  {
    let mut dependents: HashMap<String, Vec<String>> = HashMap::new();
    let mut dependencies: HashMap<String, Vec<String>> = HashMap::new();
    let mut entry_points = Vec::new();

    for (name, deps) in decls {
      dependents.entry(name.to_string()).or_default();
      dependencies.insert(name.to_string(), deps.to_vec());

      if deps.is_empty() {
        entry_points.push(name.to_string());
      }

      for dep in deps {
        dependents
          .entry(dep.clone())
          .or_default()
          .push(name.to_string());
      }
    }

    Self {
      dependents,
      dependencies,
      entry_points,
    }
  }

  /// Nodes with no dependencies.
  pub fn entry_points(&self) -> &[String] {
    &self.entry_points
  }

  /// Nodes that list `name` as a dependency.
  pub fn dependents(&self, name: &str) -> &[String] {
    self
      .dependents
      .get(name)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Nodes that `name` depends on.
  pub fn dependencies(&self, name: &str) -> &[String] {
    self
      .dependencies
      .get(name)
      .map(|v| v.as_slice())
      .unwrap_or(&[])
  }

  /// Whether `ancestor` is reachable by following dependencies from `name`.
  pub fn depends_on(&self, name: &str, ancestor: &str) -> bool {
    let mut stack: Vec<&str> = self.dependencies(name).iter().map(String::as_str).collect();
    let mut seen: Vec<&str> = Vec::new();

    while let Some(current) = stack.pop() {
      if current == ancestor {
        return true;
      }
      if seen.contains(&current) {
        continue;
      }
      seen.push(current);
      stack.extend(self.dependencies(current).iter().map(String::as_str));
    }

    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn deps(names: &[&str]) -> Vec<String> {
    names.iter().map(|s| s.to_string()).collect()
  }

  #[test]
  fn test_diamond_structure() {
    let a = deps(&[]);
    let b = deps(&["a"]);
    let c = deps(&["a"]);
    let d = deps(&["b", "c"]);
    let graph = Graph::new([
      ("a", a.as_slice()),
      ("b", b.as_slice()),
      ("c", c.as_slice()),
      ("d", d.as_slice()),
    ]);

    assert_eq!(graph.entry_points(), &["a".to_string()]);
    assert_eq!(graph.dependents("a"), &["b".to_string(), "c".to_string()]);
    assert_eq!(graph.dependencies("d"), &["b".to_string(), "c".to_string()]);
    assert!(graph.dependents("d").is_empty());
    assert!(graph.depends_on("d", "a"));
    assert!(!graph.depends_on("b", "c"));
  }
}
