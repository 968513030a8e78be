use std::path::PathBuf;

use sprout_process::ProcessError;
use sprout_prompt::PromptError;
use sprout_template::TemplateError;
use thiserror::Error;

/// Errors raised by the create tasks.
#[derive(Debug, Error)]
pub enum CreateError {
  #[error(transparent)]
  Process(#[from] ProcessError),

  #[error(transparent)]
  Prompt(#[from] PromptError),

  #[error(transparent)]
  Template(#[from] TemplateError),

  /// A git configuration value the workflow depends on is unset.
  #[error("please configure {key} in git")]
  ConfigMissing { key: String },

  #[error("required tool '{tool}' was not found on PATH")]
  MissingTool { tool: String },

  #[error("workspace directory does not exist: {}", .path.display())]
  MissingWorkspace { path: PathBuf },

  /// A task ran before the task that sets `field`. Only reachable with a
  /// miswired graph.
  #[error("project {field} has not been set")]
  MissingField { field: &'static str },

  #[error("invalid project name '{name}': {reason}")]
  InvalidName { name: String, reason: String },
}
