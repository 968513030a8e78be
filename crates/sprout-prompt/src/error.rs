use thiserror::Error;

/// Errors that end a prompt session early.
#[derive(Debug, Error)]
pub enum PromptError {
  /// Input reached EOF before every prompt was answered.
  #[error("input closed while waiting for an answer to '{question}'")]
  InputClosed { question: String },

  /// Reading from or writing to the console failed.
  #[error("console i/o failed")]
  Io(#[from] std::io::Error),
}
