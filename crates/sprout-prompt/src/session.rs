//! Prompt session definition and execution.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::PromptError;

/// Outcome of validating one answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
  pub success: bool,
  /// Shown to the user when `success` is false.
  pub error: String,
}

impl Validation {
  pub fn ok() -> Self {
    Self {
      success: true,
      error: String::new(),
    }
  }

  pub fn fail(error: impl Into<String>) -> Self {
    Self {
      success: false,
      error: error.into(),
    }
  }
}

type Validator = Box<dyn Fn(&str) -> Validation + Send + Sync>;

enum Check {
  Free,
  Validated(Validator),
  Choices(Vec<String>),
}

enum PromptItem {
  Text(String),
  Input { question: String, check: Check },
}

/// An ordered set of prompts.
#[derive(Default)]
pub struct PromptSession {
  items: Vec<PromptItem>,
}

impl PromptSession {
  pub fn new() -> Self {
    Self::default()
  }

  /// Display a line of text. Produces no answer.
  pub fn text(mut self, text: impl Into<String>) -> Self {
    self.items.push(PromptItem::Text(text.into()));
    self
  }

  /// Ask a free-text question. Any answer, including an empty one, is accepted.
  pub fn input(mut self, question: impl Into<String>) -> Self {
    self.items.push(PromptItem::Input {
      question: question.into(),
      check: Check::Free,
    });
    self
  }

  /// Ask a question whose answer must pass `validator`.
  pub fn validated_input<F>(mut self, question: impl Into<String>, validator: F) -> Self
  where
    F: Fn(&str) -> Validation + Send + Sync + 'static,
  {
    self.items.push(PromptItem::Input {
      question: question.into(),
      check: Check::Validated(Box::new(validator)),
    });
    self
  }

  /// Ask a question whose answer must be one of `options`.
  pub fn choice<I, S>(mut self, question: impl Into<String>, options: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.items.push(PromptItem::Input {
      question: question.into(),
      check: Check::Choices(options.into_iter().map(Into::into).collect()),
    });
    self
  }

  /// Number of answers this session will produce.
  pub fn input_count(&self) -> usize {
    self
      .items
      .iter()
      .filter(|item| matches!(item, PromptItem::Input { .. }))
      .count()
  }

  /// Run every prompt in order and return the answers.
  pub async fn run<R, W>(&self, reader: &mut R, writer: &mut W) -> Result<Vec<String>, PromptError>
  where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
  {
    let mut answers = Vec::with_capacity(self.input_count());

    for item in &self.items {
      match item {
        PromptItem::Text(text) => {
          writer.write_all(format!("{}\n", text).as_bytes()).await?;
          writer.flush().await?;
        }
        PromptItem::Input { question, check } => {
          let answer = ask(question, check, reader, writer).await?;
          answers.push(answer);
        }
      }
    }

    Ok(answers)
  }
}

/// Ask one question until its answer is accepted.
async fn ask<R, W>(
  question: &str,
  check: &Check,
  reader: &mut R,
  writer: &mut W,
) -> Result<String, PromptError>
where
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  let label = match check {
    Check::Choices(options) => format!("{} ({}) ", question, options.join("/")),
    _ => format!("{} ", question),
  };

  loop {
    writer.write_all(label.as_bytes()).await?;
    writer.flush().await?;

    let answer = read_answer(reader).await?.ok_or_else(|| PromptError::InputClosed {
      question: question.to_string(),
    })?;

    let validation = match check {
      Check::Free => Validation::ok(),
      Check::Validated(validator) => validator(&answer),
      Check::Choices(options) => {
        if options.iter().any(|o| *o == answer) {
          Validation::ok()
        } else {
          Validation::fail(format!("Please answer one of: {}", options.join(", ")))
        }
      }
    };

    if validation.success {
      return Ok(answer);
    }

    debug!(question = %question, error = %validation.error, "answer rejected");
    writer
      .write_all(format!("{}\n", validation.error).as_bytes())
      .await?;
  }
}

/// Read one line without its terminator. `None` at EOF.
async fn read_answer<R: AsyncBufRead + Unpin>(reader: &mut R) -> std::io::Result<Option<String>> {
  let mut line = String::new();
  if reader.read_line(&mut line).await? == 0 {
    return Ok(None);
  }
  if line.ends_with('\n') {
    line.pop();
    if line.ends_with('\r') {
      line.pop();
    }
  }
  Ok(Some(line))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_read_answer_strips_crlf() {
    let mut reader: &[u8] = b"yes\r\nno";
    assert_eq!(read_answer(&mut reader).await.unwrap().as_deref(), Some("yes"));
    assert_eq!(read_answer(&mut reader).await.unwrap().as_deref(), Some("no"));
    assert_eq!(read_answer(&mut reader).await.unwrap(), None);
  }

  #[test]
  fn test_input_count_ignores_text() {
    let session = PromptSession::new()
      .text("")
      .input("name?")
      .text("hint")
      .choice("ok?", ["y", "n"]);
    assert_eq!(session.input_count(), 2);
  }
}
