//! Task orchestration for sprout.
//!
//! # Architecture
//!
//! ```text
//! TaskMap (name -> depends_on + Task)
//!   │  validated into a TaskGraph (unknown deps, duplicates, cycles)
//!   ▼
//! Orchestrator::run(tasks, context)
//!   │  starts every task whose dependencies are Done, concurrently
//!   │  stops starting tasks after the first failure
//!   ▼
//! NamedTask::run() ── Task::execute(&SharedContext)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let tasks = TaskMap::new()
//!   .task("fetch", [] as [&str; 0], fetch)
//!   .task("build", ["fetch"], build);
//!
//! let context = SharedContext::new(State::default());
//! let report = Orchestrator::new().run(tasks, &context).await?;
//! ```

mod context;
mod error;
mod events;
mod orchestrator;
mod state;
mod task;

pub use context::SharedContext;
pub use error::RunError;
pub use events::{ChannelNotifier, ExecutionEvent, ExecutionNotifier, NoopNotifier};
pub use orchestrator::{Orchestrator, RunReport};
pub use sprout_graph::GraphError;
pub use state::{ExecutionState, TaskState};
pub use task::{FnTask, NamedTask, Task, TaskMap, TaskSpec, from_fn};
