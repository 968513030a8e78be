use std::path::PathBuf;
use std::sync::Arc;

use sprout_process::ProcessRunner;
use sprout_prompt::SharedConsole;
use sprout_template::TemplateGenerator;

use crate::settings::Settings;
use crate::tools::Tools;

/// Collaborators shared by every create task.
pub struct CreateEnv {
  pub settings: Settings,
  /// Root the configured template is looked up in.
  pub templates_dir: PathBuf,
  /// Directory the project directory is created in.
  pub workspace: PathBuf,
  pub tools: Tools,
  pub generator: Arc<dyn TemplateGenerator>,
  pub console: SharedConsole,
}

impl CreateEnv {
  pub fn new(
    settings: Settings,
    templates_dir: impl Into<PathBuf>,
    workspace: impl Into<PathBuf>,
    runner: Arc<dyn ProcessRunner>,
    generator: Arc<dyn TemplateGenerator>,
    console: SharedConsole,
  ) -> Self {
    let tools = Tools::new(runner, &settings);
    Self {
      settings,
      templates_dir: templates_dir.into(),
      workspace: workspace.into(),
      tools,
      generator,
      console,
    }
  }
}
