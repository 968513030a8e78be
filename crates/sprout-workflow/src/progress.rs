use colored::Colorize;
use sprout_runtime::{ExecutionEvent, ExecutionNotifier};

/// Prints one line per task as the run progresses.
#[derive(Debug, Clone, Default)]
pub struct ProgressNotifier;

impl ProgressNotifier {
  pub fn new() -> Self {
    Self
  }

  fn line(event: &ExecutionEvent) -> Option<String> {
    match event {
      ExecutionEvent::TaskStarted { task, .. } => Some(format!("{} {}", "▸".cyan(), task)),
      ExecutionEvent::TaskFailed { task, error, .. } => {
        Some(format!("{} {}: {}", "✗".red(), task.bold(), error))
      }
      _ => None,
    }
  }
}

impl ExecutionNotifier for ProgressNotifier {
  fn notify(&self, event: ExecutionEvent) {
    if let Some(line) = Self::line(&event) {
      eprintln!("{line}");
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_only_starts_and_failures_print() {
    colored::control::set_override(false);
    let started = ExecutionEvent::TaskStarted {
      execution_id: "x".to_string(),
      task: "initLocalRepo".to_string(),
    };
    assert_eq!(ProgressNotifier::line(&started).unwrap(), "▸ initLocalRepo");

    let completed = ExecutionEvent::TaskCompleted {
      execution_id: "x".to_string(),
      task: "initLocalRepo".to_string(),
    };
    assert!(ProgressNotifier::line(&completed).is_none());
  }
}
