//! Interactive prompt sessions for sprout.
//!
//! A [`PromptSession`] is an ordered list of prompts that is run against a
//! line-oriented reader and a writer. Display-only text produces no answer;
//! every input prompt produces exactly one answer, in declaration order.
//!
//! Validated prompts are re-asked until their validator accepts the answer,
//! so validation failures never escape the session.

mod console;
mod error;
mod session;

pub use console::{Console, SharedConsole};
pub use error::PromptError;
pub use session::{PromptSession, Validation};
