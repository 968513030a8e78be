//! Thin wrappers over the external programs the workflow drives.
//!
//! Every call goes through a [`ProcessRunner`] so tests can substitute a fake.

use std::path::Path;
use std::sync::Arc;

use sprout_process::{CapturedOutput, CommandSpec, ProcessError, ProcessRunner};

use crate::settings::Settings;

/// Version control operations.
#[derive(Clone)]
pub struct Git {
  runner: Arc<dyn ProcessRunner>,
  program: String,
}

impl Git {
  pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
    Self {
      runner,
      program: program.into(),
    }
  }

  fn command<'a>(&self, dir: &Path, args: impl IntoIterator<Item = &'a str>) -> CommandSpec {
    CommandSpec::new(&self.program).args(args).current_dir(dir)
  }

  pub async fn init(&self, dir: &Path) -> Result<CapturedOutput, ProcessError> {
    self.runner.run(&self.command(dir, ["init"])).await
  }

  /// Read a global config value. Unset or blank values are `None`.
  pub async fn global_config(&self, key: &str) -> Result<Option<String>, ProcessError> {
    let spec = CommandSpec::new(&self.program)
      .args(["config", "--global", key])
      .capture_stdout();

    match self.runner.run(&spec).await {
      Ok(output) => {
        let value = output.stdout.unwrap_or_default().trim().to_string();
        Ok((!value.is_empty()).then_some(value))
      }
      // git config exits with 1 when the key is not set
      Err(e) if e.exit_code() == Some(1) => Ok(None),
      Err(e) => Err(e),
    }
  }

  pub async fn add_all(&self, dir: &Path) -> Result<CapturedOutput, ProcessError> {
    self.runner.run(&self.command(dir, ["add", "--all"])).await
  }

  pub async fn commit_all(
    &self,
    dir: &Path,
    message: &str,
  ) -> Result<CapturedOutput, ProcessError> {
    self
      .runner
      .run(&self.command(dir, ["commit", "--all", "--message", message]))
      .await
  }

  pub async fn push(
    &self,
    dir: &Path,
    remote: &str,
    branch: &str,
  ) -> Result<CapturedOutput, ProcessError> {
    self.runner.run(&self.command(dir, ["push", remote, branch])).await
  }
}

/// Code hosting service CLI.
#[derive(Clone)]
pub struct Hosting {
  runner: Arc<dyn ProcessRunner>,
  program: String,
}

impl Hosting {
  pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
    Self {
      runner,
      program: program.into(),
    }
  }

  /// Create the hosted repository `{user}/{project}` and register it as `origin`.
  pub async fn create(&self, dir: &Path, repository: &str) -> Result<CapturedOutput, ProcessError> {
    let spec = CommandSpec::new(&self.program)
      .args(["create", repository])
      .current_dir(dir);
    self.runner.run(&spec).await
  }
}

/// Continuous integration setup tool.
#[derive(Clone)]
pub struct Ci {
  runner: Arc<dyn ProcessRunner>,
  program: String,
}

impl Ci {
  pub fn new(runner: Arc<dyn ProcessRunner>, program: impl Into<String>) -> Self {
    Self {
      runner,
      program: program.into(),
    }
  }

  /// Enable CI for the repository.
  pub async fn enable(&self, dir: &Path) -> Result<CapturedOutput, ProcessError> {
    let spec = CommandSpec::new(&self.program).current_dir(dir);
    self.runner.run(&spec).await
  }

  /// Write the test configuration.
  pub async fn configure_tests(&self, dir: &Path) -> Result<CapturedOutput, ProcessError> {
    let spec = CommandSpec::new(&self.program).arg("test").current_dir(dir);
    self.runner.run(&spec).await
  }
}

/// Package dependency installer.
#[derive(Clone)]
pub struct Installer {
  runner: Arc<dyn ProcessRunner>,
  program: String,
  args: Vec<String>,
}

impl Installer {
  pub fn new(
    runner: Arc<dyn ProcessRunner>,
    program: impl Into<String>,
    args: Vec<String>,
  ) -> Self {
    Self {
      runner,
      program: program.into(),
      args,
    }
  }

  pub async fn install(&self, dir: &Path) -> Result<CapturedOutput, ProcessError> {
    let spec = CommandSpec::new(&self.program)
      .args(self.args.iter().map(String::as_str))
      .current_dir(dir);
    self.runner.run(&spec).await
  }
}

/// All external tools, configured from [`Settings`].
#[derive(Clone)]
pub struct Tools {
  pub git: Git,
  pub hosting: Hosting,
  pub ci: Ci,
  pub installer: Installer,
}

impl Tools {
  pub fn new(runner: Arc<dyn ProcessRunner>, settings: &Settings) -> Self {
    Self {
      git: Git::new(Arc::clone(&runner), &settings.git_program),
      hosting: Hosting::new(Arc::clone(&runner), &settings.hosting_program),
      ci: Ci::new(Arc::clone(&runner), &settings.ci_program),
      installer: Installer::new(
        runner,
        &settings.installer.program,
        settings.installer.args.clone(),
      ),
    }
  }
}
