//! Integration tests for the tsconf CLI
//!
//! These tests run the binary end-to-end against projects in temp directories

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper function to create a test CLI command
#[allow(deprecated)]
fn cli() -> Command {
    let mut command = Command::cargo_bin("tsconf").unwrap();
    command.env_remove("TSCONF_PROJECT").env_remove("RUST_LOG");
    command
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Project with a shared base config, sources, a build output and a test file
fn create_test_project() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    write(
        root,
        "tsconfig.base.json",
        r#"{ "compilerOptions": { "target": "es2017", "strict": true } }"#,
    );
    write(
        root,
        "tsconfig.json",
        r#"{
            "extends": "./tsconfig.base.json",
            "compilerOptions": { "outDir": "dist" },
            "include": ["src"],
            "exclude": ["**/*.test.ts"]
        }"#,
    );
    write(root, "src/index.ts", "export {};");
    write(root, "src/index.test.ts", "");
    write(root, "src/lib/util.js", "");
    write(root, "dist/index.js", "");
    temp_dir
}

#[test]
fn test_help_command() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Inspect tsconfig-style project configuration"));
}

#[test]
fn test_version_command() {
    cli()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_files_lists_matching_sources() {
    let project = create_test_project();
    cli()
        .current_dir(project.path())
        .args(["--no-color", "files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/index.ts"))
        .stdout(predicate::str::contains("index.test.ts").not())
        .stdout(predicate::str::contains("util.js").not());
}

#[test]
fn test_compiler_arguments_override_config() {
    let project = create_test_project();
    cli()
        .current_dir(project.path())
        .args(["--no-color", "files", "--allowJs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/lib/util.js"));
}

#[test]
fn test_project_directory_argument() {
    let project = create_test_project();
    let outside = TempDir::new().unwrap();
    cli()
        .current_dir(outside.path())
        .arg("--project")
        .arg(project.path())
        .args(["--no-color", "files"])
        .assert()
        .success()
        .stdout(predicate::str::contains("src/index.ts"));
}

#[test]
fn test_show_config_merges_extends() {
    let project = create_test_project();
    let output = cli()
        .current_dir(project.path())
        .args(["--no-color", "show-config", "--target", "es2022"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let config: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(config["compilerOptions"]["target"], "es2022");
    assert_eq!(config["compilerOptions"]["strict"], true);
    assert_eq!(config["include"], serde_json::json!(["src"]));
    assert_eq!(config["files"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_watch_dirs_json() {
    let project = create_test_project();
    let output = cli()
        .current_dir(project.path())
        .args(["--format", "json", "watch-dirs"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let report: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let directories = report["wildcardDirectories"].as_object().unwrap();
    assert_eq!(directories.len(), 1);
    let (path, recursive) = directories.iter().next().unwrap();
    assert!(path.ends_with("/src"));
    assert_eq!(recursive, &serde_json::Value::Bool(true));
    assert_eq!(report["diagnostics"], serde_json::json!([]));
}

#[test]
fn test_diagnostics_fail_the_run() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "tsconfig.json",
        r#"{ "extends": "./missing.json", "compilerOptions": { "stict": true } }"#,
    );
    write(temp_dir.path(), "a.ts", "");

    cli()
        .current_dir(temp_dir.path())
        .args(["--no-color", "files"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("a.ts"))
        .stderr(predicate::str::contains("error TS6053: File './missing.json' not found."))
        .stderr(predicate::str::contains("Did you mean 'strict'?"))
        .stderr(predicate::str::contains("Found 2 errors."));
}

#[test]
fn test_missing_project() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["--project", "nowhere", "files"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Cannot find a tsconfig.json file"));
}

#[test]
fn test_loose_files_skip_config_lookup() {
    let temp_dir = TempDir::new().unwrap();
    cli()
        .current_dir(temp_dir.path())
        .args(["--format", "json", "files", "main.ts", "--strict"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"configFile\": null"))
        .stdout(predicate::str::contains("main.ts"));
}
