use std::fs;
use std::path::Path;

use sprout_template::{FsTemplateGenerator, TemplateError, TemplateGenerator, TemplateRequest};
use tempfile::TempDir;

fn write(path: &Path, contents: &[u8]) {
  fs::create_dir_all(path.parent().unwrap()).unwrap();
  fs::write(path, contents).unwrap();
}

fn request(source: &Path, target: &Path) -> TemplateRequest {
  TemplateRequest {
    template_name: "basic".to_string(),
    source_dir: source.to_path_buf(),
    target_name: "my-app".to_string(),
    description: "a demo".to_string(),
    target_dir: target.to_path_buf(),
  }
}

#[tokio::test]
async fn test_generate_renders_files_and_paths() {
  let templates = TempDir::new().unwrap();
  let workspace = TempDir::new().unwrap();
  let root = templates.path().join("basic");
  write(
    &root.join("package.json"),
    b"{ \"name\": \"{{ name }}\", \"description\": \"{{ description }}\" }\n",
  );
  write(&root.join("lib/{{ name }}.js"), b"module.exports = {}\n");

  let created = FsTemplateGenerator::new()
    .generate(&request(templates.path(), workspace.path()))
    .await
    .unwrap();

  assert_eq!(created, workspace.path().join("my-app"));
  let package = fs::read_to_string(created.join("package.json")).unwrap();
  assert_eq!(package, "{ \"name\": \"my-app\", \"description\": \"a demo\" }\n");
  assert!(created.join("lib/my-app.js").is_file());
}

#[tokio::test]
async fn test_generate_copies_binary_files_verbatim() {
  let templates = TempDir::new().unwrap();
  let workspace = TempDir::new().unwrap();
  let bytes = [0xff, 0xfe, b'{', b'{', 0x00];
  write(&templates.path().join("basic/logo.bin"), &bytes);

  let created = FsTemplateGenerator::new()
    .generate(&request(templates.path(), workspace.path()))
    .await
    .unwrap();

  assert_eq!(fs::read(created.join("logo.bin")).unwrap(), bytes);
}

#[tokio::test]
async fn test_generate_missing_template() {
  let templates = TempDir::new().unwrap();
  let workspace = TempDir::new().unwrap();

  let err = FsTemplateGenerator::new()
    .generate(&request(templates.path(), workspace.path()))
    .await
    .unwrap_err();

  assert!(matches!(err, TemplateError::TemplateNotFound { ref name, .. } if name == "basic"));
  assert!(!workspace.path().join("my-app").exists());
}

#[tokio::test]
async fn test_generate_refuses_existing_target() {
  let templates = TempDir::new().unwrap();
  let workspace = TempDir::new().unwrap();
  write(&templates.path().join("basic/README.md"), b"# {{ name }}\n");
  fs::create_dir(workspace.path().join("my-app")).unwrap();

  let err = FsTemplateGenerator::new()
    .generate(&request(templates.path(), workspace.path()))
    .await
    .unwrap_err();

  assert!(matches!(err, TemplateError::TargetExists { .. }));
}

#[tokio::test]
async fn test_render_failure_removes_partial_target() {
  let templates = TempDir::new().unwrap();
  let workspace = TempDir::new().unwrap();
  write(&templates.path().join("basic/README.md"), b"# {{ name }}\n");
  write(&templates.path().join("basic/broken.txt"), b"{{ name ");

  let generator = FsTemplateGenerator::new();
  let err = generator
    .generate(&request(templates.path(), workspace.path()))
    .await
    .unwrap_err();
  assert!(matches!(err, TemplateError::Render { .. }));
  assert!(!workspace.path().join("my-app").exists());

  // a fixed template can be generated into the same target afterwards
  write(&templates.path().join("basic/broken.txt"), b"fixed {{ name }}");
  let created = generator
    .generate(&request(templates.path(), workspace.path()))
    .await
    .unwrap();
  assert_eq!(fs::read_to_string(created.join("broken.txt")).unwrap(), "fixed my-app");
}
