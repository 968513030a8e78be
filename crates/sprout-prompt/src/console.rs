use std::pin::Pin;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncWrite, BufReader};
use tokio::sync::Mutex;

use crate::error::PromptError;
use crate::session::PromptSession;

/// A console shared between tasks; holding the lock keeps a whole session together.
pub type SharedConsole = Arc<Mutex<Console>>;

/// Input/output pair that prompt sessions run against.
pub struct Console {
  reader: Pin<Box<dyn AsyncBufRead + Send>>,
  writer: Pin<Box<dyn AsyncWrite + Send>>,
}

impl Console {
  pub fn new<R, W>(reader: R, writer: W) -> Self
  where
    R: AsyncBufRead + Send + 'static,
    W: AsyncWrite + Send + 'static,
  {
    Self {
      reader: Box::pin(reader),
      writer: Box::pin(writer),
    }
  }

  /// The process's stdin and stdout.
  pub fn stdio() -> Self {
    Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
  }

  pub fn shared(self) -> SharedConsole {
    Arc::new(Mutex::new(self))
  }

  /// Run `session` against this console.
  pub async fn run(&mut self, session: &PromptSession) -> Result<Vec<String>, PromptError> {
    session.run(&mut self.reader, &mut self.writer).await
  }
}
