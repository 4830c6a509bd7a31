// tests/cli_test.rs
mod common;

use common::TestRepo;
use std::process::{Command, Output};

fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_recommended-bump"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn released_repo() -> TestRepo {
    let mut test_repo = TestRepo::new();
    test_repo.commit("feat: first\n\naffects: pkg-a");
    test_repo.tag("pkg-a@1.0.0");
    test_repo.commit("feat: second\n\naffects: pkg-a");
    test_repo
}

#[test]
fn test_help() {
    let output = run_cli(&["--help"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("recommended-bump"));
    assert!(stdout.contains("--header-pattern"));
    assert!(stdout.contains("--no-ignore-reverted"));
}

#[test]
fn test_prints_release_type() {
    let test_repo = released_repo();
    let repo_path = test_repo.path().to_str().unwrap();

    let output = run_cli(&["pkg-a", "--preset", "angular", "-C", repo_path]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "minor\n");
}

#[test]
fn test_verbose_prints_reason() {
    let test_repo = released_repo();
    let repo_path = test_repo.path().to_str().unwrap();

    let output = run_cli(&["pkg-a", "-p", "angular", "-v", "-C", repo_path]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(
        stdout,
        "minor\nReason: There are 0 BREAKING CHANGES and 1 features\n"
    );
}

#[test]
fn test_note_keywords_flag() {
    let mut test_repo = released_repo();
    test_repo.commit("fix: rename\n\naffects: pkg-a\n\nBREAKS: old name");
    let repo_path = test_repo.path().to_str().unwrap();

    let output = run_cli(&[
        "pkg-a",
        "-p",
        "angular",
        "-n",
        "BREAKS, BREAKING CHANGE",
        "-C",
        repo_path,
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "major\n");
}

#[test]
fn test_unknown_preset_fails() {
    let test_repo = released_repo();
    let repo_path = test_repo.path().to_str().unwrap();

    let output = run_cli(&["pkg-a", "--preset", "jquery", "-C", repo_path]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Preset: \"jquery\" does not exist"));
}

#[test]
fn test_config_file_flag() {
    let test_repo = released_repo();
    let repo_path = test_repo.path().to_str().unwrap();
    let config_path = test_repo.path().join("bump.toml");
    std::fs::write(
        &config_path,
        "[what_bump]\nmajor = [\"feat\"]\n",
    )
    .unwrap();

    let output = run_cli(&[
        "pkg-a",
        "--config",
        config_path.to_str().unwrap(),
        "-C",
        repo_path,
    ]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "major\n");
}

#[test]
fn test_local_config_found_through_repo_flag() {
    let test_repo = released_repo();
    std::fs::write(
        test_repo.path().join(".recommended-bump.toml"),
        "[what_bump]\nmajor = [\"feat\"]\n",
    )
    .unwrap();
    let nested = test_repo.path().join("packages").join("pkg-a");
    std::fs::create_dir_all(&nested).unwrap();

    let output = run_cli(&["pkg-a", "-C", nested.to_str().unwrap()]);

    assert!(output.status.success());
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "major\n");
}

#[test]
fn test_missing_package_argument() {
    let output = run_cli(&["--preset", "angular"]);
    assert!(!output.status.success());
}
