//! User settings for the create workflow.
//!
//! Loaded from a JSON file; every field is optional and falls back to the
//! default shown below.
//!
//! ```json
//! {
//!   "template": "github",
//!   "git_host": "github.com",
//!   "installer": { "program": "npm", "args": ["install"] },
//!   "commit_message": "initial commit",
//!   "push_branch": "master",
//!   "command_timeout_secs": 600
//! }
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("failed to read settings file {}", .path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse settings file {}", .path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_json::Error,
  },
}

/// Dependency installer invocation, run inside the new project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallerSettings {
  pub program: String,
  #[serde(default)]
  pub args: Vec<String>,
}

impl Default for InstallerSettings {
  fn default() -> Self {
    Self {
      program: "npm".to_string(),
      args: vec!["install".to_string()],
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
  /// Template directory name.
  pub template: String,
  /// Root holding the templates. `None` means the bundled templates.
  pub templates_dir: Option<PathBuf>,
  /// Host used to build the ssh remote, `git@{git_host}:{user}/{project}`.
  pub git_host: String,
  pub git_program: String,
  pub hosting_program: String,
  pub ci_program: String,
  pub installer: InstallerSettings,
  pub commit_message: String,
  pub push_branch: String,
  /// Upper bound for every external command. `None` waits forever.
  pub command_timeout_secs: Option<u64>,
  /// Executables that must be on `PATH`. `None` derives the list from the
  /// configured programs.
  pub required_tools: Option<Vec<String>>,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      template: "github".to_string(),
      templates_dir: None,
      git_host: "github.com".to_string(),
      git_program: "git".to_string(),
      hosting_program: "hub".to_string(),
      ci_program: "travisify".to_string(),
      installer: InstallerSettings::default(),
      commit_message: "initial commit".to_string(),
      push_branch: "master".to_string(),
      command_timeout_secs: None,
      required_tools: None,
    }
  }
}

impl Settings {
  /// Load settings from a JSON file.
  pub fn load(path: &Path) -> Result<Self, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
      path: path.to_path_buf(),
      source,
    })?;
    Self::from_json(path, &content)
  }

  /// Load `path` if it exists, otherwise return the defaults.
  pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
    if path.is_file() {
      Self::load(path)
    } else {
      Ok(Self::default())
    }
  }

  fn from_json(path: &Path, content: &str) -> Result<Self, SettingsError> {
    serde_json::from_str(content).map_err(|source| SettingsError::Parse {
      path: path.to_path_buf(),
      source,
    })
  }

  /// Executables checked before anything else runs.
  pub fn required_tools(&self) -> Vec<String> {
    match &self.required_tools {
      Some(tools) => tools.clone(),
      None => {
        let mut tools = vec![
          self.git_program.clone(),
          self.hosting_program.clone(),
          self.ci_program.clone(),
          self.installer.program.clone(),
        ];
        tools.dedup();
        tools
      }
    }
  }
}
