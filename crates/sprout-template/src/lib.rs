//! Project template rendering.
//!
//! A template is a directory tree under a templates root. Generating a project
//! copies the tree into a fresh target directory, rendering file contents and
//! path segments through minijinja with `name` and `description` in scope.

mod error;
mod generator;

pub use error::TemplateError;
pub use generator::{FsTemplateGenerator, TemplateGenerator, TemplateRequest};
