use std::path::{Path, PathBuf};
use std::time::Duration;

/// Description of an external command to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
  pub program: String,
  pub args: Vec<String>,
  pub current_dir: Option<PathBuf>,
  /// Capture stdout instead of discarding it.
  pub capture_stdout: bool,
  /// Overrides the runner's default timeout.
  pub timeout: Option<Duration>,
}

impl CommandSpec {
  pub fn new(program: impl Into<String>) -> Self {
    Self {
      program: program.into(),
      args: Vec::new(),
      current_dir: None,
      capture_stdout: false,
      timeout: None,
    }
  }

  pub fn arg(mut self, arg: impl Into<String>) -> Self {
    self.args.push(arg.into());
    self
  }

  pub fn args<I, S>(mut self, args: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.args.extend(args.into_iter().map(Into::into));
    self
  }

  pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
    self.current_dir = Some(dir.as_ref().to_path_buf());
    self
  }

  pub fn capture_stdout(mut self) -> Self {
    self.capture_stdout = true;
    self
  }

  pub fn timeout(mut self, timeout: Duration) -> Self {
    self.timeout = Some(timeout);
    self
  }

  /// The command line as a single display string, e.g. `git push origin master`.
  pub fn display(&self) -> String {
    if self.args.is_empty() {
      self.program.clone()
    } else {
      format!("{} {}", self.program, self.args.join(" "))
    }
  }
}

/// Output collected from a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput {
  /// Stderr, in the order the chunks were read.
  pub stderr: Vec<String>,
  /// Stdout, only present when [`CommandSpec::capture_stdout`] was set.
  pub stdout: Option<String>,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_display_joins_args() {
    let spec = CommandSpec::new("git").args(["commit", "--all", "--message", "initial commit"]);
    assert_eq!(spec.display(), "git commit --all --message initial commit");
  }

  #[test]
  fn test_display_without_args() {
    assert_eq!(CommandSpec::new("travisify").display(), "travisify");
  }

  #[test]
  fn test_builder_defaults() {
    let spec = CommandSpec::new("npm").arg("install").current_dir("/tmp/my-app");
    assert!(!spec.capture_stdout);
    assert_eq!(spec.timeout, None);
    assert_eq!(spec.current_dir, Some(PathBuf::from("/tmp/my-app")));
  }
}
