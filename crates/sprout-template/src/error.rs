use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while generating a project from a template.
#[derive(Debug, Error)]
pub enum TemplateError {
  #[error("template '{name}' not found in {}", .root.display())]
  TemplateNotFound { name: String, root: PathBuf },

  #[error("target directory already exists: {}", .path.display())]
  TargetExists { path: PathBuf },

  #[error("failed to render {}: {message}", .path.display())]
  Render { path: PathBuf, message: String },

  #[error("io error at {}", .path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },
}

impl TemplateError {
  pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
    let path = path.into();
    move |source| TemplateError::Io { path, source }
  }
}
