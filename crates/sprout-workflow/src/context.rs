use std::path::PathBuf;

/// Facts accumulated by the create tasks.
///
/// Each field is written by exactly one task and read by its dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectContext {
  /// Validated, lowercased project name.
  pub name: Option<String>,
  pub description: Option<String>,
  /// Directory the scaffold was generated into.
  pub target_dir: Option<PathBuf>,
  /// `git@{host}:{user}/{project}`
  pub git_remote: Option<String>,
  /// `{user}/{project}`
  pub github_remote: Option<String>,
  /// Answer to the coverage setup question.
  pub coverage_confirmed: Option<bool>,
}

impl ProjectContext {
  /// Start from a name given on the command line.
  pub fn with_name(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      ..Self::default()
    }
  }
}
