//! Prompt session behaviour against in-memory input.

use sprout_prompt::{Console, PromptError, PromptSession, Validation};

fn not_empty(input: &str) -> Validation {
  if input.is_empty() {
    Validation::fail("An answer is required:")
  } else {
    Validation::ok()
  }
}

#[tokio::test]
async fn test_answers_follow_declaration_order() {
  let session = PromptSession::new()
    .text("")
    .input("What is your project called?")
    .input("What does your project do?");

  let mut input: &[u8] = b"my-app\na demo\n";
  let mut output = Vec::new();
  let answers = session.run(&mut input, &mut output).await.unwrap();

  assert_eq!(answers, vec!["my-app".to_string(), "a demo".to_string()]);
}

#[tokio::test]
async fn test_empty_answers_are_kept_verbatim() {
  let session = PromptSession::new().input("first").input("second");

  let mut input: &[u8] = b"\n  spaced  \n";
  let mut output = Vec::new();
  let answers = session.run(&mut input, &mut output).await.unwrap();

  assert_eq!(answers, vec!["".to_string(), "  spaced  ".to_string()]);
}

#[tokio::test]
async fn test_validator_reprompts_until_success() {
  let session = PromptSession::new().validated_input("name?", not_empty);

  let mut input: &[u8] = b"\n\nfinally\n";
  let mut output = Vec::new();
  let answers = session.run(&mut input, &mut output).await.unwrap();

  assert_eq!(answers, vec!["finally".to_string()]);
  let shown = String::from_utf8(output).unwrap();
  assert_eq!(shown.matches("An answer is required:").count(), 2);
  assert_eq!(shown.matches("name?").count(), 3);
}

#[tokio::test]
async fn test_choice_rejects_unknown_options() {
  let session = PromptSession::new().choice("Did you turn on coveralls?", ["y", "n"]);

  let mut input: &[u8] = b"maybe\nY\nn\n";
  let mut output = Vec::new();
  let answers = session.run(&mut input, &mut output).await.unwrap();

  assert_eq!(answers, vec!["n".to_string()]);
  let shown = String::from_utf8(output).unwrap();
  assert!(shown.contains("Did you turn on coveralls? (y/n)"));
  assert_eq!(shown.matches("Please answer one of: y, n").count(), 2);
}

#[tokio::test]
async fn test_text_is_displayed() {
  let session = PromptSession::new()
    .text("Setup coveralls.")
    .choice("ok?", ["y", "n"]);

  let mut input: &[u8] = b"y\n";
  let mut output = Vec::new();
  session.run(&mut input, &mut output).await.unwrap();

  assert!(String::from_utf8(output).unwrap().starts_with("Setup coveralls.\n"));
}

#[tokio::test]
async fn test_eof_before_all_answers_fails() {
  let session = PromptSession::new().input("first").input("second");

  let mut input: &[u8] = b"only one\n";
  let mut output = Vec::new();
  let err = session.run(&mut input, &mut output).await.unwrap_err();

  assert!(matches!(err, PromptError::InputClosed { question } if question == "second"));
}

#[tokio::test]
async fn test_console_runs_session() {
  let mut console = Console::new(std::io::Cursor::new(b"y\n".to_vec()), tokio::io::sink());
  let session = PromptSession::new().choice("continue?", ["y", "n"]);

  let answers = console.run(&session).await.unwrap();

  assert_eq!(answers, vec!["y".to_string()]);
}
