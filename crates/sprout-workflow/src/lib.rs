//! The `sprout create` workflow.
//!
//! Nine tasks scaffold a project, wire it to version control and a hosted
//! remote, set up CI and coverage, install dependencies, and push the first
//! commit. Tasks share a [`ProjectContext`] and run on the `sprout-runtime`
//! orchestrator; external programs go through a `ProcessRunner` and prompts
//! through a shared `Console`.

mod context;
mod env;
mod error;
mod progress;
mod settings;
mod summary;
mod tasks;
mod tools;
mod validate;
mod workflow;

pub use context::ProjectContext;
pub use env::CreateEnv;
pub use error::CreateError;
pub use progress::ProgressNotifier;
pub use settings::{InstallerSettings, Settings, SettingsError};
pub use summary::Summary;
pub use tasks::{
  CheckPreconditions, ConfigureCi, ConfigureCoverage, CreateHostedRemote, CreateScaffold,
  GatherProjectInfo, InitLocalRepo, InstallDependencies, PushCode,
};
pub use tools::{Ci, Git, Hosting, Installer, Tools};
pub use validate::{normalize_project_name, validate_project_name};
pub use workflow::{
  CHECK_PRECONDITIONS, CONFIGURE_CI, CONFIGURE_COVERAGE, CREATE_HOSTED_REMOTE, CREATE_SCAFFOLD,
  GATHER_PROJECT_INFO, INIT_LOCAL_REPO, INSTALL_DEPENDENCIES, Outcome, PUSH_CODE, create_tasks,
  run_create,
};
