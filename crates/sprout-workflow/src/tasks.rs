//! The create tasks. Each reads what its dependencies stored in the
//! [`ProjectContext`] and records its own result there.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use colored::Colorize;
use sprout_prompt::PromptSession;
use sprout_runtime::{SharedContext, Task};
use sprout_template::TemplateRequest;
use tracing::{debug, info};

use crate::context::ProjectContext;
use crate::env::CreateEnv;
use crate::error::CreateError;
use crate::validate::{normalize_project_name, validate_project_name};

type Context = SharedContext<ProjectContext>;

fn require<T>(
  context: &Context,
  field: &'static str,
  get: impl FnOnce(&ProjectContext) -> Option<T>,
) -> Result<T, CreateError> {
  context
    .read(get)
    .ok_or(CreateError::MissingField { field })
}

fn target_dir(context: &Context) -> Result<PathBuf, CreateError> {
  require(context, "target_dir", |c| c.target_dir.clone())
}

/// Verifies the workspace exists and every required tool is on `PATH`.
pub struct CheckPreconditions {
  env: Arc<CreateEnv>,
}

impl CheckPreconditions {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for CheckPreconditions {
  async fn execute(&self, _context: &Context) -> Result<(), CreateError> {
    if !self.env.workspace.is_dir() {
      return Err(CreateError::MissingWorkspace {
        path: self.env.workspace.clone(),
      });
    }

    for tool in self.env.settings.required_tools() {
      match which::which(&tool) {
        Ok(path) => debug!(tool = %tool, path = %path.display(), "tool_found"),
        Err(_) => return Err(CreateError::MissingTool { tool }),
      }
    }
    Ok(())
  }
}

/// Asks for the project name (unless preset) and description.
pub struct GatherProjectInfo {
  env: Arc<CreateEnv>,
}

impl GatherProjectInfo {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for GatherProjectInfo {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let preset = match context.read(|c| c.name.clone()) {
      Some(name) => Some(
        normalize_project_name(&name).map_err(|reason| CreateError::InvalidName { name, reason })?,
      ),
      None => None,
    };

    let bullet = "*".green();
    let mut session = PromptSession::new().text("");
    if preset.is_none() {
      session = session.validated_input(
        format!(" {bullet} What is your project called?"),
        validate_project_name,
      );
    }
    session = session.input(format!(" {bullet} What does your project do? (description)"));

    let answers = self.env.console.lock().await.run(&session).await?;
    let mut answers = answers.into_iter();

    let name = match preset {
      Some(name) => name,
      None => answers.next().unwrap_or_default().to_lowercase(),
    };
    let description = answers
      .next()
      .filter(|d| !d.is_empty())
      .unwrap_or_else(|| name.clone());

    info!(name = %name, "project_info_gathered");
    context.update(|c| {
      c.name = Some(name);
      c.description = Some(description);
    });
    Ok(())
  }
}

/// Renders the configured template into `{workspace}/{name}`.
pub struct CreateScaffold {
  env: Arc<CreateEnv>,
}

impl CreateScaffold {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for CreateScaffold {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let name = require(context, "name", |c| c.name.clone())?;
    let description = require(context, "description", |c| c.description.clone())?;

    let request = TemplateRequest {
      template_name: self.env.settings.template.clone(),
      source_dir: self.env.templates_dir.clone(),
      target_name: name,
      description,
      target_dir: self.env.workspace.clone(),
    };
    let created = self.env.generator.generate(&request).await?;

    context.update(|c| c.target_dir = Some(created));
    Ok(())
  }
}

/// `git init` in the new project.
pub struct InitLocalRepo {
  env: Arc<CreateEnv>,
}

impl InitLocalRepo {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for InitLocalRepo {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let dir = target_dir(context)?;
    self.env.tools.git.init(&dir).await?;
    Ok(())
  }
}

/// Creates `{user}/{project}` on the hosting service, `user` being the
/// global git `user.name`.
pub struct CreateHostedRemote {
  env: Arc<CreateEnv>,
}

impl CreateHostedRemote {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for CreateHostedRemote {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let name = require(context, "name", |c| c.name.clone())?;
    let dir = target_dir(context)?;

    let key = "user.name";
    let user = self
      .env
      .tools
      .git
      .global_config(key)
      .await?
      .ok_or_else(|| CreateError::ConfigMissing { key: key.to_string() })?;

    let repository = format!("{user}/{name}");
    self.env.tools.hosting.create(&dir, &repository).await?;

    let git_remote = format!("git@{}:{}", self.env.settings.git_host, repository);
    info!(remote = %git_remote, "hosted_remote_created");
    context.update(|c| {
      c.git_remote = Some(git_remote);
      c.github_remote = Some(repository);
    });
    Ok(())
  }
}

/// Walks the user through enabling coverage reporting.
pub struct ConfigureCoverage {
  env: Arc<CreateEnv>,
}

impl ConfigureCoverage {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for ConfigureCoverage {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let name = require(context, "name", |c| c.name.clone())?;

    let session = PromptSession::new()
      .text(format!(
        "Setup coveralls. Go to https://coveralls.io/repos/new and add {name}"
      ))
      .choice("Did you turn on coveralls?", ["y", "n"]);

    let answers = self.env.console.lock().await.run(&session).await?;
    let confirmed = answers.first().is_some_and(|a| a == "y");

    debug!(confirmed, "coverage_answered");
    context.update(|c| c.coverage_confirmed = Some(confirmed));
    Ok(())
  }
}

/// Enables CI, then writes its test configuration.
pub struct ConfigureCi {
  env: Arc<CreateEnv>,
}

impl ConfigureCi {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for ConfigureCi {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let dir = target_dir(context)?;
    self.env.tools.ci.enable(&dir).await?;
    self.env.tools.ci.configure_tests(&dir).await?;
    Ok(())
  }
}

/// Installs the project's dependencies.
pub struct InstallDependencies {
  env: Arc<CreateEnv>,
}

impl InstallDependencies {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for InstallDependencies {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let dir = target_dir(context)?;
    self.env.tools.installer.install(&dir).await?;
    Ok(())
  }
}

/// Stages, commits and pushes the initial commit. Stops at the first failure.
pub struct PushCode {
  env: Arc<CreateEnv>,
}

impl PushCode {
  pub fn new(env: Arc<CreateEnv>) -> Self {
    Self { env }
  }
}

#[async_trait]
impl Task<ProjectContext, CreateError> for PushCode {
  async fn execute(&self, context: &Context) -> Result<(), CreateError> {
    let dir = target_dir(context)?;
    let git = &self.env.tools.git;
    let settings = &self.env.settings;

    git.add_all(&dir).await?;
    git.commit_all(&dir, &settings.commit_message).await?;
    git.push(&dir, "origin", &settings.push_branch).await?;
    Ok(())
  }
}
