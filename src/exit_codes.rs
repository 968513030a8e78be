//! Exit codes for the sprout CLI.

/// The command succeeded.
pub const OK: u8 = 0;
/// Settings, the task graph or any task failed.
pub const FAILED: u8 = 1;
