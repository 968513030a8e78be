use std::path::{Path, PathBuf};

use async_trait::async_trait;
use minijinja::{Environment, Value, context};
use tokio::fs;
use tracing::{debug, warn};

use crate::error::TemplateError;

/// Everything a generator needs to materialise one project.
#[derive(Debug, Clone)]
pub struct TemplateRequest {
  /// Template directory name under `source_dir`.
  pub template_name: String,
  /// Root directory holding the templates.
  pub source_dir: PathBuf,
  /// Name of the generated project. Also the name of the created directory.
  pub target_name: String,
  pub description: String,
  /// Workspace the project directory is created in.
  pub target_dir: PathBuf,
}

impl TemplateRequest {
  /// Directory the project will be written to.
  pub fn destination(&self) -> PathBuf {
    self.target_dir.join(&self.target_name)
  }
}

/// Produces a project directory from a template.
#[async_trait]
pub trait TemplateGenerator: Send + Sync {
  /// Generate the project and return the path of the created directory.
  async fn generate(&self, request: &TemplateRequest) -> Result<PathBuf, TemplateError>;
}

/// Filesystem template generator.
///
/// Templates are plain directory trees:
/// ```text
/// {source_dir}/
/// └── github/
///     ├── package.json      # "name": "{{ name }}"
///     ├── README.md
///     └── test/
///         └── index.js
/// ```
///
/// UTF-8 files and every path segment are rendered with minijinja. Anything
/// else is copied byte for byte.
#[derive(Debug, Default, Clone)]
pub struct FsTemplateGenerator;

impl FsTemplateGenerator {
  pub fn new() -> Self {
    Self
  }
}

#[async_trait]
impl TemplateGenerator for FsTemplateGenerator {
  async fn generate(&self, request: &TemplateRequest) -> Result<PathBuf, TemplateError> {
    let template_root = request.source_dir.join(&request.template_name);
    if !template_root.is_dir() {
      return Err(TemplateError::TemplateNotFound {
        name: request.template_name.clone(),
        root: request.source_dir.clone(),
      });
    }

    let destination = request.destination();
    if destination.exists() {
      return Err(TemplateError::TargetExists { path: destination });
    }

    fs::create_dir_all(&destination)
      .await
      .map_err(TemplateError::io(&destination))?;

    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);
    let ctx = context! {
      name => request.target_name.clone(),
      description => request.description.clone(),
    };

    if let Err(e) = render_dir(&env, &ctx, &template_root, &destination).await {
      // never leave a partial project behind
      if let Err(cleanup) = fs::remove_dir_all(&destination).await {
        warn!(
          destination = %destination.display(),
          error = %cleanup,
          "template_cleanup_failed"
        );
      }
      return Err(e);
    }

    debug!(
      template = %request.template_name,
      destination = %destination.display(),
      "template_generated"
    );
    Ok(destination)
  }
}

/// Recursively render a template directory into `dest`.
async fn render_dir(
  env: &Environment<'_>,
  ctx: &Value,
  src: &Path,
  dest: &Path,
) -> Result<(), TemplateError> {
  let mut entries = fs::read_dir(src).await.map_err(TemplateError::io(src))?;
  while let Some(entry) = entries.next_entry().await.map_err(TemplateError::io(src))? {
    let src_path = entry.path();
    let file_name = entry.file_name();
    let dest_name = match file_name.to_str() {
      Some(n) => render(env, ctx, &src_path, n)?,
      None => file_name.to_string_lossy().into_owned(),
    };
    let dest_path = dest.join(dest_name);

    if src_path.is_dir() {
      fs::create_dir_all(&dest_path)
        .await
        .map_err(TemplateError::io(&dest_path))?;
      Box::pin(render_dir(env, ctx, &src_path, &dest_path)).await?;
      continue;
    }

    let bytes = fs::read(&src_path)
      .await
      .map_err(TemplateError::io(&src_path))?;
    let contents = match String::from_utf8(bytes) {
      Ok(text) => render(env, ctx, &src_path, &text)?.into_bytes(),
      Err(raw) => raw.into_bytes(),
    };
    fs::write(&dest_path, contents)
      .await
      .map_err(TemplateError::io(&dest_path))?;
  }

  Ok(())
}

fn render(
  env: &Environment<'_>,
  ctx: &Value,
  path: &Path,
  source: &str,
) -> Result<String, TemplateError> {
  if !source.contains("{{") && !source.contains("{%") {
    return Ok(source.to_string());
  }
  env
    .render_str(source, ctx.clone())
    .map_err(|e| TemplateError::Render {
      path: path.to_path_buf(),
      message: e.to_string(),
    })
}
