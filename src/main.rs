use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;

use sprout_process::TokioRunner;
use sprout_prompt::Console;
use sprout_runtime::Orchestrator;
use sprout_template::FsTemplateGenerator;
use sprout_workflow::{CreateEnv, ProgressNotifier, ProjectContext, Settings, Summary, run_create};

mod exit_codes;
mod logging;

/// Templates shipped with sprout.
const BUNDLED_TEMPLATES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

/// Sprout - scaffold a project and wire it up to git, hosting and CI
#[derive(Parser)]
#[command(name = "sprout")]
#[command(version, about, long_about = None)]
struct Cli {
  /// Path to a settings file (default: ~/.sprout/config.json)
  #[arg(long, global = true)]
  config: Option<PathBuf>,

  /// Directory containing project templates
  #[arg(long, global = true)]
  templates_dir: Option<PathBuf>,

  /// Template to generate from
  #[arg(long, global = true)]
  template: Option<String>,

  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Create a new project in the current directory
  Create {
    /// Project name. Prompted for when omitted
    name: Option<String>,
  },
}

fn main() -> ExitCode {
  logging::init();
  let cli = Cli::parse();

  let code = match &cli.command {
    Some(Commands::Create { name }) => match create(&cli, name.clone()) {
      Ok(summary) => {
        print!("{summary}");
        exit_codes::OK
      }
      Err(e) => {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        exit_codes::FAILED
      }
    },
    None => {
      println!("sprout - use --help to see available commands");
      exit_codes::OK
    }
  };

  ExitCode::from(code)
}

fn load_settings(cli: &Cli) -> Result<Settings> {
  let mut settings = match &cli.config {
    Some(path) => Settings::load(path)?,
    None => match dirs::home_dir() {
      Some(home) => Settings::load_or_default(&home.join(".sprout").join("config.json"))?,
      None => Settings::default(),
    },
  };

  if let Some(dir) = &cli.templates_dir {
    settings.templates_dir = Some(dir.clone());
  }
  if let Some(template) = &cli.template {
    settings.template = template.clone();
  }
  Ok(settings)
}

fn create(cli: &Cli, name: Option<String>) -> Result<Summary> {
  let settings = load_settings(cli).context("failed to load settings")?;
  let workspace = std::env::current_dir().context("failed to determine current directory")?;

  let rt = tokio::runtime::Builder::new_current_thread()
    .enable_all()
    .build()
    .context("failed to start runtime")?;
  rt.block_on(create_async(settings, workspace, name))
}

async fn create_async(
  settings: Settings,
  workspace: PathBuf,
  name: Option<String>,
) -> Result<Summary> {
  let runner = match settings.command_timeout_secs {
    Some(secs) => TokioRunner::with_timeout(Duration::from_secs(secs)),
    None => TokioRunner::new(),
  };
  let templates_dir = settings
    .templates_dir
    .clone()
    .unwrap_or_else(|| Path::new(BUNDLED_TEMPLATES).to_path_buf());

  let env = Arc::new(CreateEnv::new(
    settings.clone(),
    templates_dir,
    workspace,
    Arc::new(runner),
    Arc::new(FsTemplateGenerator::new()),
    Console::stdio().shared(),
  ));

  let initial = match name {
    Some(name) => ProjectContext::with_name(name),
    None => ProjectContext::default(),
  };

  let orchestrator = Orchestrator::with_notifier(Arc::new(ProgressNotifier::new()));
  let outcome = run_create(env, initial, &orchestrator)
    .await
    .context("project creation failed")?;

  Ok(Summary::from_context(&outcome.project, &settings)?)
}
