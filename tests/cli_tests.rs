#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn crudgen(root: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crudgen"))
        .current_dir(root)
        .env_remove("CRUDGEN_ROOT")
        .env_remove("RUST_LOG")
        .args(args)
        .output()
        .expect("run cli")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_cli_generate_creates_scaffold() {
    let dir = tempfile::tempdir().unwrap();
    let output = crudgen(
        dir.path(),
        &["generate", "Admin/Post", "--fields", "title:string,body:text:nullable", "--search"],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let out = stdout(&output);
    assert!(out.contains("✅ Created"));
    assert!(out.contains("app/Models/Post.php"));
    assert!(dir.path().join("app/Http/Controllers/Admin/PostController.php").is_file());
    assert!(fs::read_to_string(dir.path().join("routes/web.php"))
        .unwrap()
        .contains("Route::resource('admin.posts'"));

    let again = crudgen(dir.path(), &["generate", "Admin/Post", "--fields", "title"]);
    assert!(again.status.success());
    assert!(stdout(&again).contains("⚠️  Skipped"));
}

#[test]
fn test_cli_generate_json_report() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();
    let output = Command::new(env!("CARGO_BIN_EXE_crudgen"))
        .env("CRUDGEN_ROOT", root)
        .args(["generate", "Post", "--fields", "title", "--api", "--json", "--dry-run"])
        .output()
        .expect("run cli");
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["plan"]["route_base"], "posts");
    assert_eq!(report["fields"][0]["name"], "title");
    assert_eq!(report["fields"][0]["type"], "string");
    let artifacts = report["artifacts"].as_array().unwrap();
    assert!(artifacts.iter().all(|a| a["status"] == "planned"));
    assert!(artifacts.iter().any(|a| a["kind"] == "api_resource"));
    assert!(artifacts.iter().any(|a| a["kind"] == "api_route"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cli_only_limits_parts() {
    let dir = tempfile::tempdir().unwrap();
    let output = crudgen(dir.path(), &["generate", "Post", "--only", "model,routes"]);
    assert!(output.status.success());
    assert!(dir.path().join("app/Models/Post.php").is_file());
    assert!(dir.path().join("routes/web.php").is_file());
    assert!(!dir.path().join("app/Http/Controllers").exists());
    assert!(!dir.path().join("resources").exists());
}

#[test]
fn test_cli_exits_non_zero_on_artifact_failure() {
    let dir = tempfile::tempdir().unwrap();
    let stubs = dir.path().join("stubs/crud-generator");
    fs::create_dir_all(&stubs).unwrap();
    fs::write(stubs.join("model.stub"), "{{ missing_key }}").unwrap();

    let output = crudgen(dir.path(), &["generate", "Post"]);
    assert!(!output.status.success());
    assert!(stdout(&output).contains("❌ Failed"));
    // later artifacts are still written
    assert!(dir.path().join("app/Http/Controllers/PostController.php").is_file());
}

#[test]
fn test_cli_rejects_empty_name_and_strict_fields() {
    let dir = tempfile::tempdir().unwrap();
    assert!(!crudgen(dir.path(), &["generate", "/"]).status.success());
    assert!(!crudgen(dir.path(), &["generate", "Post", "--fields", "title,:text", "--strict-fields"])
        .status
        .success());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cli_plan_prints_names_and_fragments() {
    let dir = tempfile::tempdir().unwrap();
    let output = crudgen(dir.path(), &["plan", "Admin/Post", "--fields", "title,views:integer"]);
    assert!(output.status.success());

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["plan"]["entity_name"], "Post");
    assert_eq!(plan["plan"]["view_path"], "admin.posts");
    assert_eq!(plan["controller_class"], "PostController");
    assert_eq!(plan["fragments"]["fillable"], "'title',\n        'views'");
    assert!(plan["fragments"]["search_predicate"]
        .as_str()
        .unwrap()
        .contains("$q->where('title', 'like'"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_cli_install_and_publish_stubs() {
    let dir = tempfile::tempdir().unwrap();
    let output = crudgen(dir.path(), &["install"]);
    assert!(output.status.success());
    assert!(dir.path().join("crudgen.toml").is_file());
    assert!(dir.path().join("resources/views/layouts/app.blade.php").is_file());
    assert!(dir.path().join("app/Http/Controllers/ApiSuperController.php").is_file());

    let output = crudgen(dir.path(), &["publish-stubs"]);
    assert!(output.status.success());
    assert!(dir.path().join("stubs/crud-generator/controller.stub").is_file());
    assert!(dir.path().join("stubs/crud-generator/views/index.blade.stub").is_file());

    let again = crudgen(dir.path(), &["install"]);
    assert!(again.status.success());
    assert_eq!(stdout(&again).matches("Skipped").count(), 4);
}
