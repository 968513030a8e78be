use std::sync::OnceLock;

use regex::Regex;
use sprout_prompt::Validation;

const MAX_NAME_LEN: usize = 64;

const TOO_LONG: &str = "Project names should be 64 character or shorter:";
const BAD_CHARACTERS: &str =
  "Names must start with a letter and can only contain letters, numbers and \"-\":";

fn name_regex() -> &'static Regex {
  static RE: OnceLock<Regex> = OnceLock::new();
  RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9-]*$").expect("invalid project name regex"))
}

/// Check a project name. The input is lowercased before any rule applies.
pub fn validate_project_name(input: &str) -> Validation {
  let name = input.to_lowercase();

  if name.chars().count() > MAX_NAME_LEN {
    return Validation::fail(TOO_LONG);
  }

  if name_regex().is_match(&name) {
    Validation::ok()
  } else {
    Validation::fail(BAD_CHARACTERS)
  }
}

/// Lowercase and validate, returning the stored form of the name.
pub fn normalize_project_name(input: &str) -> Result<String, String> {
  let validation = validate_project_name(input);
  if validation.success {
    Ok(input.to_lowercase())
  } else {
    Err(validation.error)
  }
}
