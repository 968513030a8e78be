//! Subprocess execution for sprout.
//!
//! Every external tool the workflow touches (`git`, `hub`, CI helpers,
//! package installers) is launched through a [`ProcessRunner`]. The default
//! implementation, [`TokioRunner`], spawns a real child process:
//!
//! - stdin is closed
//! - stdout is discarded unless the [`CommandSpec`] asks for it
//! - stderr is collected chunk by chunk for diagnostics
//!
//! A run succeeds only when the child exits with code 0.

mod command;
mod error;
mod runner;

pub use command::{CapturedOutput, CommandSpec};
pub use error::ProcessError;
pub use runner::{ProcessRunner, TokioRunner};
