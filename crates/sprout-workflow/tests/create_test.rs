use std::io::Cursor;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use sprout_process::{CapturedOutput, CommandSpec, ProcessError, ProcessRunner};
use sprout_prompt::Console;
use sprout_runtime::{Orchestrator, RunError};
use sprout_template::FsTemplateGenerator;
use sprout_workflow::{CreateEnv, CreateError, ProjectContext, Settings, Summary, run_create};
use tempfile::TempDir;

/// Records every command and answers `git config` with a fixed user.
#[derive(Default)]
struct FakeRunner {
  calls: Mutex<Vec<CommandSpec>>,
  user_name: Option<String>,
  /// Commands whose command line starts with this fail with exit code 1.
  fail_command: Option<String>,
}

impl FakeRunner {
  fn with_user(user: &str) -> Self {
    Self {
      user_name: Some(format!("{user}\n")),
      ..Self::default()
    }
  }

  fn failing(mut self, command: &str) -> Self {
    self.fail_command = Some(command.to_string());
    self
  }

  fn commands(&self) -> Vec<String> {
    self.calls.lock().unwrap().iter().map(CommandSpec::display).collect()
  }

  fn dir_of(&self, command: &str) -> Option<PathBuf> {
    self
      .calls
      .lock()
      .unwrap()
      .iter()
      .find(|s| s.display() == command)
      .and_then(|s| s.current_dir.clone())
  }
}

#[async_trait]
impl ProcessRunner for FakeRunner {
  async fn run(&self, spec: &CommandSpec) -> Result<CapturedOutput, ProcessError> {
    self.calls.lock().unwrap().push(spec.clone());

    if self
      .fail_command
      .as_deref()
      .is_some_and(|prefix| spec.display().starts_with(prefix))
    {
      return Err(ProcessError::Exited {
        command: spec.display(),
        code: 1,
        stderr: vec!["boom".to_string()],
      });
    }

    if spec.args.first().map(String::as_str) == Some("config") {
      return match &self.user_name {
        Some(user) => Ok(CapturedOutput {
          stderr: Vec::new(),
          stdout: Some(user.clone()),
        }),
        None => Err(ProcessError::Exited {
          command: spec.display(),
          code: 1,
          stderr: Vec::new(),
        }),
      };
    }

    Ok(CapturedOutput::default())
  }
}

struct Fixture {
  templates: TempDir,
  workspace: TempDir,
}

impl Fixture {
  fn new() -> Self {
    let templates = TempDir::new().unwrap();
    let root = templates.path().join("github");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(
      root.join("package.json"),
      "{ \"name\": \"{{ name }}\", \"description\": \"{{ description }}\" }\n",
    )
    .unwrap();

    Self {
      templates,
      workspace: TempDir::new().unwrap(),
    }
  }

  fn env(&self, runner: Arc<FakeRunner>, input: &str) -> Arc<CreateEnv> {
    let settings = Settings {
      required_tools: Some(Vec::new()),
      ..Settings::default()
    };
    let console = Console::new(Cursor::new(input.as_bytes().to_vec()), tokio::io::sink());
    Arc::new(CreateEnv::new(
      settings,
      self.templates.path(),
      self.workspace.path(),
      runner,
      Arc::new(FsTemplateGenerator::new()),
      console.shared(),
    ))
  }

  fn project_dir(&self) -> PathBuf {
    self.workspace.path().join("my-app")
  }
}

fn position(commands: &[String], command: &str) -> usize {
  commands
    .iter()
    .position(|c| c == command)
    .unwrap_or_else(|| panic!("{command} was not run: {commands:?}"))
}

#[tokio::test]
async fn test_create_end_to_end() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice"));
  let env = fixture.env(Arc::clone(&runner), "my-app\na demo\ny\n");

  let outcome = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap();

  let project = &outcome.project;
  assert_eq!(project.name.as_deref(), Some("my-app"));
  assert_eq!(project.description.as_deref(), Some("a demo"));
  assert_eq!(project.git_remote.as_deref(), Some("git@github.com:alice/my-app"));
  assert_eq!(project.github_remote.as_deref(), Some("alice/my-app"));
  assert_eq!(project.coverage_confirmed, Some(true));
  assert_eq!(project.target_dir.as_deref(), Some(fixture.project_dir().as_path()));
  assert_eq!(outcome.report.completed.len(), 9);

  let package = std::fs::read_to_string(fixture.project_dir().join("package.json")).unwrap();
  assert_eq!(package, "{ \"name\": \"my-app\", \"description\": \"a demo\" }\n");

  let commands = runner.commands();
  let init = position(&commands, "git init");
  let hub = position(&commands, "hub create alice/my-app");
  let travis = position(&commands, "travisify");
  let travis_test = position(&commands, "travisify test");
  let add = position(&commands, "git add --all");
  let commit = position(&commands, "git commit --all --message initial commit");
  let push = position(&commands, "git push origin master");
  position(&commands, "npm install");

  assert!(init < hub);
  assert!(hub < travis && travis < travis_test);
  assert!(travis_test < add && add < commit && commit < push);

  assert_eq!(runner.dir_of("git init"), Some(fixture.project_dir()));
  assert_eq!(runner.dir_of("npm install"), Some(fixture.project_dir()));

  let summary = Summary::from_context(project, &Settings::default()).unwrap();
  assert_eq!(summary.hosting_url, "https://github.com/alice/my-app");
}

#[tokio::test]
async fn test_preset_name_skips_prompt() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice"));
  let env = fixture.env(Arc::clone(&runner), "\nn\n");

  let outcome = run_create(env, ProjectContext::with_name("My-App"), &Orchestrator::new())
    .await
    .unwrap();

  let project = &outcome.project;
  assert_eq!(project.name.as_deref(), Some("my-app"));
  // empty description falls back to the name
  assert_eq!(project.description.as_deref(), Some("my-app"));
  assert_eq!(project.coverage_confirmed, Some(false));
  assert!(runner.commands().contains(&"git push origin master".to_string()));
}

#[tokio::test]
async fn test_invalid_name_reprompts() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice"));
  let env = fixture.env(Arc::clone(&runner), "1-bad\nMy-App\na demo\ny\n");

  let outcome = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap();

  assert_eq!(outcome.project.name.as_deref(), Some("my-app"));
}

#[tokio::test]
async fn test_invalid_preset_name_fails() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice"));
  let env = fixture.env(Arc::clone(&runner), "");

  let err = run_create(env, ProjectContext::with_name("my_app"), &Orchestrator::new())
    .await
    .unwrap_err();

  assert_eq!(err.task(), Some("gatherProjectInfo"));
  assert!(matches!(
    err,
    RunError::TaskFailed { source: CreateError::InvalidName { .. }, .. }
  ));
  assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn test_hosting_failure_stops_downstream() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice").failing("hub"));
  let env = fixture.env(Arc::clone(&runner), "my-app\na demo\ny\n");

  let err = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap_err();

  assert_eq!(err.task(), Some("createHostedRemote"));
  match &err {
    RunError::TaskFailed { source: CreateError::Process(e), .. } => {
      assert_eq!(e.exit_code(), Some(1));
      assert_eq!(e.stderr().to_vec(), vec!["boom".to_string()]);
    }
    other => panic!("unexpected error: {other:?}"),
  }
  assert!(err.completed().contains(&"initLocalRepo".to_string()));

  let commands = runner.commands();
  assert!(commands.iter().all(|c| !c.starts_with("travisify")));
  assert!(commands.iter().all(|c| !c.starts_with("git push")));
}

#[tokio::test]
async fn test_missing_git_user_name() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::default());
  let env = fixture.env(Arc::clone(&runner), "my-app\na demo\n");

  let err = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap_err();

  assert_eq!(err.task(), Some("createHostedRemote"));
  let RunError::TaskFailed { source, .. } = &err else {
    panic!("unexpected error: {err:?}");
  };
  assert_eq!(source.to_string(), "please configure user.name in git");
  assert!(runner.commands().iter().all(|c| !c.starts_with("hub")));
}

#[tokio::test]
async fn test_existing_project_directory_fails_scaffold() {
  let fixture = Fixture::new();
  std::fs::create_dir(fixture.project_dir()).unwrap();
  let runner = Arc::new(FakeRunner::with_user("alice"));
  let env = fixture.env(Arc::clone(&runner), "my-app\na demo\n");

  let err = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap_err();

  assert_eq!(err.task(), Some("createScaffold"));
  assert!(runner.commands().is_empty());
}

#[tokio::test]
async fn test_missing_tool_fails_preconditions() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice"));
  let settings = Settings {
    required_tools: Some(vec!["sprout-definitely-not-installed".to_string()]),
    ..Settings::default()
  };
  let console = Console::new(Cursor::new(b"my-app\na demo\n".to_vec()), tokio::io::sink());
  let env = Arc::new(CreateEnv::new(
    settings,
    fixture.templates.path(),
    fixture.workspace.path(),
    Arc::clone(&runner) as Arc<dyn ProcessRunner>,
    Arc::new(FsTemplateGenerator::new()),
    console.shared(),
  ));

  let err = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap_err();

  assert_eq!(err.task(), Some("checkPreconditions"));
  let RunError::TaskFailed { source, .. } = &err else {
    panic!("unexpected error: {err:?}");
  };
  assert!(matches!(
    source,
    CreateError::MissingTool { tool } if tool == "sprout-definitely-not-installed"
  ));
}

#[tokio::test]
async fn test_push_series_stops_at_first_failure() {
  let fixture = Fixture::new();
  let runner = Arc::new(FakeRunner::with_user("alice").failing("git add --all"));
  let env = fixture.env(Arc::clone(&runner), "my-app\na demo\ny\n");

  let err = run_create(env, ProjectContext::default(), &Orchestrator::new())
    .await
    .unwrap_err();

  assert_eq!(err.task(), Some("pushCode"));
  let RunError::TaskFailed { source: CreateError::Process(e), .. } = &err else {
    panic!("unexpected error: {err:?}");
  };
  assert_eq!(e.command(), "git add --all");

  let commands = runner.commands();
  assert_eq!(commands.iter().filter(|c| *c == "git add --all").count(), 1);
  assert!(commands.iter().all(|c| !c.starts_with("git commit")));
  assert!(commands.iter().all(|c| !c.starts_with("git push")));
}
