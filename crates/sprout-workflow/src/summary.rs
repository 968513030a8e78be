use std::fmt;
use std::path::PathBuf;

use colored::Colorize;

use crate::context::ProjectContext;
use crate::error::CreateError;
use crate::settings::Settings;

/// Where everything ended up, printed after a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
  pub git_remote: String,
  pub code_base: PathBuf,
  pub hosting_url: String,
  pub ci_url: String,
  pub coverage_url: String,
  pub coverage_confirmed: bool,
}

impl Summary {
  pub fn from_context(project: &ProjectContext, settings: &Settings) -> Result<Self, CreateError> {
    let git_remote = project
      .git_remote
      .clone()
      .ok_or(CreateError::MissingField { field: "git_remote" })?;
    let remote = project
      .github_remote
      .as_deref()
      .ok_or(CreateError::MissingField { field: "github_remote" })?;
    let code_base = project
      .target_dir
      .clone()
      .ok_or(CreateError::MissingField { field: "target_dir" })?;

    Ok(Self {
      git_remote,
      code_base,
      hosting_url: format!("https://{}/{remote}", settings.git_host),
      ci_url: format!("https://travis-ci.org/{remote}"),
      coverage_url: format!("https://coveralls.io/r/{remote}"),
      coverage_confirmed: project.coverage_confirmed.unwrap_or(false),
    })
  }
}

impl fmt::Display for Summary {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f)?;
    writeln!(f, "Successfully created")?;
    writeln!(f)?;
    writeln!(f, "  {} {}", "- git remote:".green(), self.git_remote)?;
    writeln!(f, "  {} {}", "- code base:".green(), self.code_base.display())?;
    writeln!(f, "  {} {}", "- github:".green(), self.hosting_url)?;
    writeln!(f, "  {} {}", "- travis:".green(), self.ci_url)?;
    write!(f, "  {} {}", "- coveralls:".green(), self.coverage_url)?;
    if !self.coverage_confirmed {
      write!(f, " {}", "(not enabled yet)".yellow())?;
    }
    writeln!(f)
  }
}
