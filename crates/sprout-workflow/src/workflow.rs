//! The create task graph.
//!
//! ```text
//! checkPreconditions
//! gatherProjectInfo
//!   └─► createScaffold
//!         ├─► installDependencies
//!         └─► initLocalRepo
//!               └─► createHostedRemote
//!                     ├─► configureCoverage ─┐
//!                     └──────────────────────┴─► configureCI
//!                                                  └─► pushCode
//! ```

use std::sync::Arc;

use sprout_runtime::{Orchestrator, RunError, RunReport, SharedContext, TaskMap};

use crate::context::ProjectContext;
use crate::env::CreateEnv;
use crate::error::CreateError;
use crate::tasks::{
  CheckPreconditions, ConfigureCi, ConfigureCoverage, CreateHostedRemote, CreateScaffold,
  GatherProjectInfo, InitLocalRepo, InstallDependencies, PushCode,
};

pub const CHECK_PRECONDITIONS: &str = "checkPreconditions";
pub const GATHER_PROJECT_INFO: &str = "gatherProjectInfo";
pub const CREATE_SCAFFOLD: &str = "createScaffold";
pub const INIT_LOCAL_REPO: &str = "initLocalRepo";
pub const CREATE_HOSTED_REMOTE: &str = "createHostedRemote";
pub const CONFIGURE_COVERAGE: &str = "configureCoverage";
pub const CONFIGURE_CI: &str = "configureCI";
pub const INSTALL_DEPENDENCIES: &str = "installDependencies";
pub const PUSH_CODE: &str = "pushCode";

const NO_DEPS: [&str; 0] = [];

/// Build the create task map over `env`.
pub fn create_tasks(env: Arc<CreateEnv>) -> TaskMap<ProjectContext, CreateError> {
  TaskMap::new()
    .task(
      CHECK_PRECONDITIONS,
      NO_DEPS,
      Arc::new(CheckPreconditions::new(Arc::clone(&env))),
    )
    .task(
      GATHER_PROJECT_INFO,
      NO_DEPS,
      Arc::new(GatherProjectInfo::new(Arc::clone(&env))),
    )
    .task(
      CREATE_SCAFFOLD,
      [GATHER_PROJECT_INFO],
      Arc::new(CreateScaffold::new(Arc::clone(&env))),
    )
    .task(
      INIT_LOCAL_REPO,
      [CREATE_SCAFFOLD],
      Arc::new(InitLocalRepo::new(Arc::clone(&env))),
    )
    .task(
      CREATE_HOSTED_REMOTE,
      [INIT_LOCAL_REPO],
      Arc::new(CreateHostedRemote::new(Arc::clone(&env))),
    )
    .task(
      CONFIGURE_COVERAGE,
      [CREATE_HOSTED_REMOTE],
      Arc::new(ConfigureCoverage::new(Arc::clone(&env))),
    )
    .task(
      CONFIGURE_CI,
      [CONFIGURE_COVERAGE, CREATE_HOSTED_REMOTE],
      Arc::new(ConfigureCi::new(Arc::clone(&env))),
    )
    .task(
      INSTALL_DEPENDENCIES,
      [CREATE_SCAFFOLD],
      Arc::new(InstallDependencies::new(Arc::clone(&env))),
    )
    .task(PUSH_CODE, [CONFIGURE_CI], Arc::new(PushCode::new(env)))
}

/// Result of a successful create run.
#[derive(Debug)]
pub struct Outcome {
  pub report: RunReport,
  pub project: ProjectContext,
}

/// Run the whole create workflow, starting from `initial` (which may carry a
/// preset name).
pub async fn run_create(
  env: Arc<CreateEnv>,
  initial: ProjectContext,
  orchestrator: &Orchestrator,
) -> Result<Outcome, RunError<CreateError>> {
  let context = SharedContext::new(initial);
  let report = orchestrator.run(create_tasks(env), &context).await?;
  Ok(Outcome {
    report,
    project: context.snapshot(),
  })
}
